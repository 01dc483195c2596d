//! 院系存储操作

use super::SeaOrmStorage;
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{QPSystemError, Result};
use crate::models::departments::{
    entities::Department,
    requests::{CreateDepartmentRequest, UpdateDepartmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_department_impl(
        &self,
        dept: CreateDepartmentRequest,
    ) -> Result<Department> {
        let model = ActiveModel {
            name: Set(dept.name),
            code: Set(dept.code),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("创建院系失败: {e}")))?;

        Ok(result.into_department())
    }

    /// 通过 ID 获取院系
    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 列出全部院系
    pub async fn list_departments_impl(&self) -> Result<Vec<Department>> {
        let results = Departments::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询院系列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_department()).collect())
    }

    /// 更新院系
    pub async fn update_department_impl(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        let existing = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询院系失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("更新院系失败: {e}")))?;

        Ok(Some(updated.into_department()))
    }

    /// 删除院系
    ///
    /// 引用完整性守卫：存在关联用户或科目时拒绝删除，
    /// 返回 ReferentialIntegrity 错误由上层转为阻断性用户错误。
    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let linked_users = Users::find()
            .filter(UserColumn::DepartmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询关联用户失败: {e}")))?;

        if linked_users > 0 {
            return Err(QPSystemError::referential_integrity(format!(
                "院系仍有 {linked_users} 个关联用户，无法删除"
            )));
        }

        let linked_subjects = Subjects::find()
            .filter(SubjectColumn::DepartmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询关联科目失败: {e}")))?;

        if linked_subjects > 0 {
            return Err(QPSystemError::referential_integrity(format!(
                "院系仍有 {linked_subjects} 个关联科目，无法删除"
            )));
        }

        let result = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("删除院系失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
