use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RosterService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::AppRole;
use crate::models::users::requests::UserListQuery;
use crate::models::{ApiResponse, ErrorCode};

/// 本系教师列表
/// GET /department/teachers
pub async fn list_teachers(
    service: &RosterService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let hod = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let Some(department_id) = hod.department_id else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "当前账号未关联院系",
        )));
    };

    let storage = service.get_storage(request);

    let query = UserListQuery {
        page: Some(1),
        size: Some(100),
        role: Some(AppRole::Teacher),
        department_id: Some(department_id),
        search: None,
    };

    match storage.list_users_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询教师名册失败: {e}"),
            )),
        ),
    }
}
