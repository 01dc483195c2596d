use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::requests::UpdateExamStatusRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 更新考试状态（scheduled / completed / cancelled）
/// PUT /exams/{id}/status
pub async fn update_exam_status(
    service: &ExamService,
    exam_id: i64,
    body: UpdateExamStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_exam_status(exam_id, &body.status).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("考试状态已更新"))),
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ExamNotFound, "考试不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新考试状态失败: {e}"),
            )),
        ),
    }
}
