use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::departments::responses::DepartmentListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_departments(
    service: &DepartmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_departments().await {
        Ok(items) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(DepartmentListResponse { items }, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询院系列表失败: {e}"),
            )),
        ),
    }
}
