//! 试卷实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "papers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub exam_type: String,
    pub set_label: String,
    pub status: String,
    pub deadline: Option<i64>,
    pub uploaded_by: i64,
    pub uploaded_at: i64,
    pub version: i32,
    pub is_selected: bool,
    pub file_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<i64>,
    pub updated_at: i64,
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
        belongs_to = "super::users::Entity",
        from = "Column::UploadedBy",
        to = "super::users::Column::Id"
    )]
    Uploader,
    #[sea_orm(has_many = "super::exams::Entity")]
    Exams,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_paper(self) -> crate::models::papers::entities::Paper {
        use crate::models::papers::entities::{ExamType, Paper, PaperStatus};
        use chrono::{DateTime, Utc};

        Paper {
            id: self.id,
            subject_id: self.subject_id,
            exam_type: self
                .exam_type
                .parse::<ExamType>()
                .unwrap_or(ExamType::MidTerm),
            set_label: self.set_label,
            status: self
                .status
                .parse::<PaperStatus>()
                .unwrap_or(PaperStatus::PendingReview),
            deadline: self
                .deadline
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            uploaded_by: self.uploaded_by,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
            version: self.version,
            is_selected: self.is_selected,
            file_path: self.file_path,
            feedback: self.feedback,
            approved_by: self.approved_by,
            approved_at: self
                .approved_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
