//! 统计存储操作（管理员总览）
//!
//! 纯只读聚合；空库时各项返回空集合或 0，不报错。

use super::SeaOrmStorage;
use crate::entity::departments::Entity as Departments;
use crate::entity::papers::{Column as PaperColumn, Entity as Papers};
use crate::entity::subjects::Entity as Subjects;
use crate::entity::user_roles::{Column as UserRoleColumn, Entity as UserRoles};
use crate::errors::{QPSystemError, Result};
use crate::models::stats::responses::{RoleCount, StatusCount};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QuerySelect};

impl SeaOrmStorage {
    /// 按角色统计用户数
    pub async fn count_users_by_role_impl(&self) -> Result<Vec<RoleCount>> {
        let rows: Vec<(String, i64)> = UserRoles::find()
            .select_only()
            .column(UserRoleColumn::Role)
            .column_as(UserRoleColumn::Id.count(), "count")
            .group_by(UserRoleColumn::Role)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("按角色统计失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(role, count)| RoleCount { role, count })
            .collect())
    }

    /// 按状态统计试卷数
    pub async fn count_papers_by_status_impl(&self) -> Result<Vec<StatusCount>> {
        let rows: Vec<(String, i64)> = Papers::find()
            .select_only()
            .column(PaperColumn::Status)
            .column_as(PaperColumn::Id.count(), "count")
            .group_by(PaperColumn::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("按状态统计失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }

    /// 院系总数
    pub async fn count_departments_impl(&self) -> Result<i64> {
        let count = Departments::find()
            .count(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("统计院系数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 科目总数
    pub async fn count_subjects_impl(&self) -> Result<i64> {
        let count = Subjects::find()
            .count(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("统计科目数量失败: {e}")))?;

        Ok(count as i64)
    }
}
