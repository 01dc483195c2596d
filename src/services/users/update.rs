use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::actions;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::audit;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证邮箱（如果提供）
    if let Some(ref email) = update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 处理密码（如果提供）
    if let Some(ref password) = update_data.password {
        if let Err(msg) = validate_password_simple(password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserPasswordWeak, msg)));
        }

        update_data.password = match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("密码哈希失败: {e}"),
                    )),
                );
            }
        };
    }

    let storage = service.get_storage(request);

    let role_change = update_data.role.clone();

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            if let Some(actor_id) = RequireJWT::extract_user_id(request) {
                audit::record(
                    &storage,
                    actor_id,
                    actions::USER_UPDATE,
                    "user",
                    Some(user.id),
                    role_change.map(|r| serde_json::json!({ "new_role": r.to_string() })),
                )
                .await;
            }

            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(UserResponse { user }, "用户信息更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在"))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("更新用户信息失败: {e}"),
        ))),
    }
}
