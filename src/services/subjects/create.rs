use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubjectService;
use crate::models::subjects::{requests::CreateSubjectRequest, responses::SubjectResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_subject(
    service: &SubjectService,
    body: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = crate::services::ensure_admin(request) {
        return Ok(resp);
    }

    if body.name.trim().is_empty() || body.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "科目名称和代码不能为空",
        )));
    }

    if body.semester < 1 || body.semester > 12 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "学期号必须在 1 到 12 之间",
        )));
    }

    let storage = service.get_storage(request);

    // 科目必须归属已存在的院系
    match storage.get_department_by_id(body.department_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::DepartmentNotFound,
                "指定的院系不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询院系失败: {e}"),
                )),
            );
        }
    }

    match storage.create_subject(body).await {
        Ok(subject) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(SubjectResponse { subject }, "科目创建成功"))),
        Err(e) => {
            let msg = format!("Subject creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::SubjectAlreadyExists,
                    "科目代码已存在",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
