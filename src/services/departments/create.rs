use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::DepartmentService;
use crate::models::departments::{requests::CreateDepartmentRequest, responses::DepartmentResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_department(
    service: &DepartmentService,
    body: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = crate::services::ensure_admin(request) {
        return Ok(resp);
    }

    if body.name.trim().is_empty() || body.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "院系名称和代码不能为空",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_department(body).await {
        Ok(department) => Ok(HttpResponse::Created().json(ApiResponse::success(
            DepartmentResponse { department },
            "院系创建成功",
        ))),
        Err(e) => {
            let msg = format!("Department creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::DepartmentAlreadyExists,
                    "院系名称或代码已存在",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
