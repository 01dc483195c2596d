use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::actions;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 不允许删除自己的账号
    if actor_id == user_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "不能删除当前登录的账号",
        )));
    }

    let storage = service.get_storage(request);

    match storage.delete_user(user_id).await {
        Ok(true) => {
            audit::record(&storage, actor_id, actions::USER_DELETE, "user", Some(user_id), None)
                .await;

            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("用户已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除用户失败: {e}"),
            )),
        ),
    }
}
