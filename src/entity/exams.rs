//! 考试安排实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub exam_type: String,
    pub paper_id: i64,
    pub title: String,
    pub scheduled_at: i64,
    pub duration_minutes: i32,
    pub status: String,
    pub created_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::papers::Entity",
        from = "Column::PaperId",
        to = "super::papers::Column::Id"
    )]
    Paper,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paper.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::{Exam, ExamStatus};
        use crate::models::papers::entities::ExamType;
        use chrono::{DateTime, Utc};

        Exam {
            id: self.id,
            subject_id: self.subject_id,
            exam_type: self
                .exam_type
                .parse::<ExamType>()
                .unwrap_or(ExamType::MidTerm),
            paper_id: self.paper_id,
            title: self.title,
            scheduled_at: DateTime::<Utc>::from_timestamp(self.scheduled_at, 0).unwrap_or_default(),
            duration_minutes: self.duration_minutes,
            status: self
                .status
                .parse::<ExamStatus>()
                .unwrap_or(ExamStatus::Scheduled),
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
