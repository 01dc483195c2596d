use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::{requests::ExamListQuery, responses::ExamListResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 考试列表
/// GET /exams
pub async fn list_exams(
    service: &ExamService,
    query: ExamListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_exams(query).await {
        Ok(items) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(ExamListResponse { items }, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询考试列表失败: {e}"),
            )),
        ),
    }
}
