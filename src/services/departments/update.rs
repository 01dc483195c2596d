use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::departments::{requests::UpdateDepartmentRequest, responses::DepartmentResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_department(
    service: &DepartmentService,
    id: i64,
    body: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = crate::services::ensure_admin(request) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.update_department(id, body).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DepartmentResponse { department },
            "院系更新成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "院系不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新院系失败: {e}"),
            )),
        ),
    }
}
