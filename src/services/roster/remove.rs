use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RosterService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::actions;
use crate::models::users::entities::AppRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;

/// 把教师移出本系
/// DELETE /department/teachers/{id}
///
/// 脱离院系的同时删除其全部科目分配；账号本身保留（删号是管理员的事）。
pub async fn remove_teacher(
    service: &RosterService,
    teacher_id: i64,
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

    let target = match storage.get_user_by_id(teacher_id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在")));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    // 只允许操作教师角色
    if target.role != AppRole::Teacher {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RoleInvalid,
            "目标账号不是教师角色",
        )));
    }

    // 只允许操作本系教师
    if target.department_id != Some(department_id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "该教师不属于本系",
        )));
    }

    // 先清空科目分配，再脱离院系
    if let Err(e) = storage.remove_all_subject_assignments(teacher_id).await {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("清除科目分配失败: {e}"),
            )),
        );
    }

    match storage.update_user_department(teacher_id, None).await {
        Ok(true) => {
            audit::record(
                &storage,
                hod.id,
                actions::ROSTER_REMOVE,
                "user",
                Some(teacher_id),
                Some(serde_json::json!({ "department_id": department_id })),
            )
            .await;

            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("教师已移出本系")))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("移出教师失败: {e}"),
            )),
        ),
    }
}
