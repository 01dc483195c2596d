//! 考试安排存储操作

use super::SeaOrmStorage;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{QPSystemError, Result};
use crate::models::exams::{
    entities::{Exam, ExamStatus},
    requests::{CreateExamData, ExamListQuery},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建考试安排
    pub async fn create_exam_impl(&self, data: CreateExamData) -> Result<Exam> {
        let model = ActiveModel {
            subject_id: Set(data.subject_id),
            exam_type: Set(data.exam_type.to_string()),
            paper_id: Set(data.paper_id),
            title: Set(data.title),
            scheduled_at: Set(data.scheduled_at.timestamp()),
            duration_minutes: Set(data.duration_minutes),
            status: Set(ExamStatus::Scheduled.to_string()),
            created_by: Set(data.created_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("创建考试安排失败: {e}")))?;

        Ok(result.into_exam())
    }

    /// 通过 ID 获取考试安排
    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询考试安排失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    /// 列出考试安排
    pub async fn list_exams_impl(&self, query: ExamListQuery) -> Result<Vec<Exam>> {
        let mut select = Exams::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let results = select
            .order_by_asc(Column::ScheduledAt)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_exam()).collect())
    }

    /// 更新考试状态
    pub async fn update_exam_status_impl(&self, id: i64, status: &ExamStatus) -> Result<bool> {
        let result = Exams::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("更新考试状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
