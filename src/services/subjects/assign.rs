use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::{
    requests::AssignTeacherRequest,
    responses::AssignedTeacherListResponse,
};
use crate::models::users::entities::AppRole;
use crate::models::{ApiResponse, ErrorCode};

/// 分配教师到科目
/// POST /subjects/{id}/teachers
///
/// 分配关系决定教师能为哪些科目上传试卷，以及按科目广播的触达范围。
pub async fn assign_teacher(
    service: &SubjectService,
    subject_id: i64,
    body: AssignTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = crate::services::ensure_admin(request) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    // 科目必须存在
    let subject = match storage.get_subject_by_id(subject_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::SubjectNotFound, "科目不存在")));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询科目失败: {e}"),
                )),
            );
        }
    };

    // 目标必须是教师角色，且属于科目所在院系
    let teacher = match storage.get_user_by_id(body.teacher_id).await {
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

    if teacher.role != AppRole::Teacher {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoleInvalid,
            "只能将教师角色的用户分配到科目",
        )));
    }

    if teacher.department_id != Some(subject.department_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "教师与科目不属于同一院系",
        )));
    }

    match storage
        .assign_teacher_to_subject(body.teacher_id, subject_id)
        .await
    {
        Ok(assignment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "分配成功")))
        }
        Err(e) => {
            let msg = format!("{e}");
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentAlreadyExists,
                    "该教师已分配到此科目",
                )))
            } else {
                Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建分配失败: {msg}"),
                )))
            }
        }
    }
}

/// 取消教师科目分配
/// DELETE /subjects/{id}/teachers/{teacher_id}
pub async fn unassign_teacher(
    service: &SubjectService,
    subject_id: i64,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = crate::services::ensure_admin(request) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage
        .remove_teacher_from_subject(teacher_id, subject_id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("分配已取消"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "分配关系不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("取消分配失败: {e}"),
            )),
        ),
    }
}

/// 科目的已分配教师列表
/// GET /subjects/{id}/teachers
pub async fn list_assigned_teachers(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_assigned_teachers(subject_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignedTeacherListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询已分配教师失败: {e}"),
            )),
        ),
    }
}
