pub mod audit;
pub mod auth;
pub mod departments;
pub mod exams;
pub mod notifications;
pub mod papers;
pub mod roster;
pub mod stats;
pub mod subjects;
pub mod users;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::AppRole;
use crate::models::{ApiResponse, ErrorCode};

/// 服务层的管理员守卫
///
/// 院系/科目路由的读写混在同一路径下（读对所有登录用户开放），
/// 角色校验放在服务层而不是路由中间件，与提交/评分类服务的
/// 权限检查方式一致。
pub(crate) fn ensure_admin(request: &HttpRequest) -> Result<(), HttpResponse> {
    match RequireJWT::extract_user_role(request) {
        Some(AppRole::Admin) => Ok(()),
        Some(_) => Err(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, "Access denied."))),
        None => Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))),
    }
}

pub use auth::AuthService;
pub use departments::DepartmentService;
pub use exams::ExamService;
pub use notifications::NotificationService;
pub use papers::PaperService;
pub use roster::RosterService;
pub use stats::StatsService;
pub use subjects::SubjectService;
pub use users::UserService;
