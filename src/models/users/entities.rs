use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 应用角色
//
// 角色存放在独立的 user_roles 关联表中（每用户一行），不是用户字段。
// admin 只管理账号和院系，对试卷内容与状态流转没有任何权限（职责分离）。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum AppRole {
    Admin,    // 管理员：账号/院系/科目管理
    Teacher,  // 教师：上传试卷
    Hod,      // 系主任：匿名评审、审批、选定
    ExamCell, // 考务中心：排考，读取已锁定试卷
}

impl AppRole {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const HOD: &'static str = "hod";
    pub const EXAM_CELL: &'static str = "exam_cell";

    pub fn admin_roles() -> &'static [&'static AppRole] {
        &[&Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static AppRole] {
        &[&Self::Teacher]
    }
    pub fn hod_roles() -> &'static [&'static AppRole] {
        &[&Self::Hod]
    }
    pub fn exam_cell_roles() -> &'static [&'static AppRole] {
        &[&Self::ExamCell]
    }
    pub fn all_roles() -> &'static [&'static AppRole] {
        &[&Self::Admin, &Self::Teacher, &Self::Hod, &Self::ExamCell]
    }
}

impl<'de> Deserialize<'de> for AppRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AppRole::ADMIN => Ok(AppRole::Admin),
            AppRole::TEACHER => Ok(AppRole::Teacher),
            AppRole::HOD => Ok(AppRole::Hod),
            AppRole::EXAM_CELL => Ok(AppRole::ExamCell),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, teacher, hod, exam_cell"
            ))),
        }
    }
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppRole::Admin => write!(f, "{}", AppRole::ADMIN),
            AppRole::Teacher => write!(f, "{}", AppRole::TEACHER),
            AppRole::Hod => write!(f, "{}", AppRole::HOD),
            AppRole::ExamCell => write!(f, "{}", AppRole::EXAM_CELL),
        }
    }
}

impl std::str::FromStr for AppRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AppRole::Admin),
            "teacher" => Ok(AppRole::Teacher),
            "hod" => Ok(AppRole::Hod),
            "exam_cell" => Ok(AppRole::ExamCell),
            _ => Err(format!("Invalid app role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,   // 活跃
    Inactive, // 停用
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive"
            ))),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub full_name: String,
    pub department_id: Option<i64>,
    pub role: AppRole,
    pub status: UserStatus,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌
    pub async fn generate_access_token(&self) -> String {
        match crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string()) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("JWT token 生成失败: {}", e);
                format!(
                    "fallback_token_{}_{}",
                    self.id,
                    chrono::Utc::now().timestamp()
                )
            }
        }
    }

    // 生成刷新令牌
    pub async fn generate_refresh_token(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> String {
        match crate::utils::jwt::JwtUtils::generate_refresh_token(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        ) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("JWT refresh token 生成失败: {}", e);
                format!(
                    "fallback_refresh_token_{}_{}",
                    self.id,
                    chrono::Utc::now().timestamp()
                )
            }
        }
    }

    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in AppRole::all_roles() {
            let parsed = AppRole::from_str(&role.to_string()).unwrap();
            assert_eq!(&&parsed, role);
        }
    }

    #[test]
    fn test_invalid_role_rejected() {
        assert!(AppRole::from_str("student").is_err());
        assert!(AppRole::from_str("").is_err());
    }
}
