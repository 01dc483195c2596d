use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AppRole, UserStatus};

// 创建用户请求（管理员）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: AppRole,
    pub department_id: Option<i64>,
}

// 更新用户请求（管理员，整体覆盖）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<AppRole>,
    pub department_id: Option<i64>,
    pub status: Option<UserStatus>,
}

// 系主任添加教师请求
//
// 邮箱已存在教师账号时把对方挂到本系；不存在时按给定资料新建
// teacher 角色账号（此时 full_name 和 password 必填）。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct AddTeacherRequest {
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
}

// 用户列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 按角色筛选
    pub role: Option<AppRole>,
    /// 按院系筛选
    pub department_id: Option<i64>,
    /// 按用户名/邮箱/姓名模糊搜索
    pub search: Option<String>,
}
