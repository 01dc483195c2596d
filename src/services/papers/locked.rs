use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaperService;
use crate::models::{ApiResponse, ErrorCode};

/// 已锁定试卷列表（考务中心排考的数据来源）
/// GET /papers/locked
pub async fn list_locked_papers(
    service: &PaperService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_locked_papers().await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询锁定试卷失败: {e}"),
            )),
        ),
    }
}
