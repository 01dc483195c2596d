use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RosterService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::actions;
use crate::models::users::entities::AppRole;
use crate::models::users::requests::{AddTeacherRequest, CreateUserRequest};
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

/// 添加教师到本系
/// POST /department/teachers
pub async fn add_teacher(
    service: &RosterService,
    body: AddTeacherRequest,
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

    if let Err(msg) = validate_email(&body.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 邮箱已有账号：只允许接收教师角色、未挂系或本系的账号
    match storage.get_user_by_email(&body.email).await {
        Ok(Some(existing)) => {
            if existing.role != AppRole::Teacher {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::RoleInvalid,
                    "该邮箱对应的账号不是教师角色",
                )));
            }

            match existing.department_id {
                Some(dept) if dept == department_id => {
                    return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                        ErrorCode::UserAlreadyExists,
                        "该教师已在本系名册中",
                    )));
                }
                Some(_) => {
                    // 挂在别的系：不允许跨系抢人
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::Forbidden,
                        "该教师属于其他院系",
                    )));
                }
                None => {}
            }

            match storage
                .update_user_department(existing.id, Some(department_id))
                .await
            {
                Ok(true) => {
                    audit::record(
                        &storage,
                        hod.id,
                        actions::ROSTER_ADD,
                        "user",
                        Some(existing.id),
                        Some(serde_json::json!({ "department_id": department_id })),
                    )
                    .await;

                    match storage.get_user_by_id(existing.id).await {
                        Ok(Some(user)) => Ok(HttpResponse::Ok()
                            .json(ApiResponse::success(UserResponse { user }, "教师已加入本系"))),
                        _ => Ok(HttpResponse::Ok()
                            .json(ApiResponse::<()>::success_empty("教师已加入本系"))),
                    }
                }
                Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "用户不存在",
                ))),
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("更新教师院系失败: {e}"),
                    )),
                ),
            }
        }
        // 邮箱无账号：按给定资料新建教师账号
        Ok(None) => {
            let (Some(username), Some(full_name), Some(password)) =
                (body.username, body.full_name, body.password)
            else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "新建教师账号需要提供 username、full_name 和 password",
                )));
            };

            if let Err(msg) = validate_username(&username) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
            }
            if let Err(msg) = validate_password_simple(&password) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserPasswordWeak, msg)));
            }

            let password_hash = match hash_password(&password) {
                Ok(hash) => hash,
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("密码哈希失败: {e}"),
                        ),
                    ));
                }
            };

            let create_request = CreateUserRequest {
                username,
                email: body.email,
                password: password_hash,
                full_name,
                role: AppRole::Teacher,
                department_id: Some(department_id),
            };

            match storage.create_user(create_request).await {
                Ok(user) => {
                    audit::record(
                        &storage,
                        hod.id,
                        actions::ROSTER_ADD,
                        "user",
                        Some(user.id),
                        Some(serde_json::json!({
                            "department_id": department_id,
                            "created": true,
                        })),
                    )
                    .await;

                    Ok(HttpResponse::Created()
                        .json(ApiResponse::success(UserResponse { user }, "教师账号已创建")))
                }
                Err(e) => {
                    let msg = format!("{e}");
                    if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                        Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                            ErrorCode::UserAlreadyExists,
                            "用户名或邮箱已存在",
                        )))
                    } else {
                        Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::UserCreationFailed,
                            format!("创建教师账号失败: {msg}"),
                        )))
                    }
                }
            }
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询用户失败: {e}"),
            )),
        ),
    }
}
