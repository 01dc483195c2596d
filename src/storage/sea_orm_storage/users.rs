//! 用户存储操作
//!
//! 角色保存在 user_roles 关联表（每用户一行），查询用户时补上角色，
//! 创建/改角色时同事务写入角色行。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::user_roles::{
    ActiveModel as UserRoleActiveModel, Column as UserRoleColumn, Entity as UserRoles,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{QPSystemError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{AppRole, User},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 查询单个用户的角色行
    async fn fetch_role<C: ConnectionTrait>(conn: &C, user_id: i64) -> Result<AppRole> {
        let role_row = UserRoles::find()
            .filter(UserRoleColumn::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户角色失败: {e}")))?;

        // 正常流程下角色行与用户同时创建；缺行时回退为最低权限的 teacher
        Ok(role_row
            .and_then(|r| r.role.parse::<AppRole>().ok())
            .unwrap_or(AppRole::Teacher))
    }

    /// 批量查询角色行
    async fn fetch_roles(&self, user_ids: &[i64]) -> Result<HashMap<i64, AppRole>> {
        let rows = UserRoles::find()
            .filter(UserRoleColumn::UserId.is_in(user_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("批量查询角色失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                let role = r.role.parse::<AppRole>().ok()?;
                Some((r.user_id, role))
            })
            .collect())
    }

    /// 创建用户（用户行 + 角色行在同一事务中写入）
    pub async fn create_user_impl(&self, user: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password),
            full_name: Set(user.full_name),
            department_id: Set(user.department_id),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("创建用户失败: {e}")))?;

        let role = user.role.clone();
        let role_model = UserRoleActiveModel {
            user_id: Set(inserted.id),
            role: Set(role.to_string()),
            assigned_at: Set(now),
            ..Default::default()
        };

        role_model
            .insert(&txn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("创建角色行失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted.into_user(role))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => {
                let role = Self::fetch_role(&self.db, model.id).await?;
                Ok(Some(model.into_user(role)))
            }
            None => Ok(None),
        }
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => {
                let role = Self::fetch_role(&self.db, model.id).await?;
                Ok(Some(model.into_user(role)))
            }
            None => Ok(None),
        }
    }

    /// 通过用户名或邮箱获取用户（登录入口）
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => {
                let role = Self::fetch_role(&self.db, model.id).await?;
                Ok(Some(model.into_user(role)))
            }
            None => Ok(None),
        }
    }

    /// 列出用户（分页）
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 按角色筛选：先取出该角色的全部用户 ID
        if let Some(ref role) = query.role {
            let role_rows = UserRoles::find()
                .filter(UserRoleColumn::Role.eq(role.to_string()))
                .all(&self.db)
                .await
                .map_err(|e| QPSystemError::database_operation(format!("查询角色失败: {e}")))?;
            let ids: Vec<i64> = role_rows.into_iter().map(|r| r.user_id).collect();
            select = select.filter(Column::Id.is_in(ids));
        }

        // 按院系筛选
        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        // 模糊搜索（用户名/邮箱/姓名）
        if let Some(ref search) = query.search {
            let pattern = format!("%{}%", escape_like_pattern(search));
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(&pattern))
                    .add(Column::Email.like(&pattern))
                    .add(Column::FullName.like(&pattern)),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户列表失败: {e}")))?;

        // 批量补角色
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let role_map = self.fetch_roles(&ids).await?;

        let items = models
            .into_iter()
            .map(|m| {
                let role = role_map.get(&m.id).cloned().unwrap_or(AppRole::Teacher);
                m.into_user(role)
            })
            .collect();

        Ok(UserListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户（整体覆盖语义；角色变更改写角色行）
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model: ActiveModel = existing.into();

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password_hash) = update.password {
            model.password_hash = Set(password_hash);
        }
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if update.department_id.is_some() {
            model.department_id = Set(update.department_id);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("更新用户失败: {e}")))?;

        // 角色重新指派：改写 user_roles 行
        if let Some(ref role) = update.role {
            UserRoles::update_many()
                .col_expr(
                    UserRoleColumn::Role,
                    sea_orm::sea_query::Expr::value(role.to_string()),
                )
                .col_expr(
                    UserRoleColumn::AssignedAt,
                    sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
                )
                .filter(UserRoleColumn::UserId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| QPSystemError::database_operation(format!("更新角色失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| QPSystemError::database_operation(format!("提交事务失败: {e}")))?;

        let role = Self::fetch_role(&self.db, id).await?;
        Ok(Some(updated.into_user(role)))
    }

    /// 删除用户（角色行与科目分配由外键级联删除）
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::LastLogin,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户所属院系
    pub async fn update_user_department_impl(
        &self,
        id: i64,
        department_id: Option<i64>,
    ) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::DepartmentId,
                sea_orm::sea_query::Expr::value(department_id),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("更新用户院系失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询用户总数失败: {e}")))?;

        Ok(count)
    }
}
