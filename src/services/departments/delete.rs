use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::errors::QPSystemError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_department(
    service: &DepartmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = crate::services::ensure_admin(request) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.delete_department(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("院系已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "院系不存在",
        ))),
        // 引用完整性守卫：关联用户/科目未清空，阻断删除，由用户先处理关联数据
        Err(e @ QPSystemError::ReferentialIntegrity(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::DepartmentHasLinkedRecords, e.message()),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除院系失败: {e}"),
            )),
        ),
    }
}
