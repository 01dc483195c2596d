//! 业务数据模型
//!
//! 按领域划分：每个领域一个目录，内含 entities / requests / responses。
//! 与 entity 模块（数据库实体）分离，Storage 层负责二者转换。

pub mod audit;
pub mod auth;
pub mod common;
pub mod departments;
pub mod exams;
pub mod notifications;
pub mod papers;
pub mod stats;
pub mod subjects;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 统一业务错误码
///
/// code 为 0 表示成功；非 0 按领域分段。
/// 错误码是封闭集合，新增值需要前后端协同更新。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 系统级错误
    InternalServerError = 1000,
    BadRequest = 1001,
    NotFound = 1002,
    Unauthorized = 1003,
    Forbidden = 1004,
    RateLimitExceeded = 1005,

    // 认证错误
    AuthFailed = 1100,
    TokenExpired = 1101,
    TokenInvalid = 1102,

    // 用户错误
    UserNotFound = 2000,
    UserAlreadyExists = 2001,
    UserCreationFailed = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordWeak = 2005,
    RoleInvalid = 2006,

    // 院系错误
    DepartmentNotFound = 3000,
    DepartmentAlreadyExists = 3001,
    DepartmentHasLinkedRecords = 3002,

    // 科目错误
    SubjectNotFound = 3100,
    SubjectAlreadyExists = 3101,
    SubjectNotAssigned = 3102,
    AssignmentAlreadyExists = 3103,

    // 试卷错误
    PaperNotFound = 4000,
    PaperUploadFailed = 4001,
    FileTypeNotAllowed = 4002,
    FileSizeExceeded = 4003,
    FileNotFound = 4004,
    MultifileUploadNotAllowed = 4005,
    InvalidTransition = 4006,
    FeedbackRequired = 4007,
    PaperPermissionDenied = 4008,

    // 通知错误
    NotificationNotFound = 5000,
    NotificationNoRecipients = 5001,

    // 考试安排错误
    ExamNotFound = 6000,
    ExamPaperNotSelectable = 6001,
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1003);
        assert_eq!(ErrorCode::InvalidTransition as i32, 4006);
        assert_eq!(ErrorCode::NotificationNoRecipients as i32, 5001);
    }
}
