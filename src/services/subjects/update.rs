use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::{requests::UpdateSubjectRequest, responses::SubjectResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_subject(
    service: &SubjectService,
    id: i64,
    body: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = crate::services::ensure_admin(request) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.update_subject(id, body).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(SubjectResponse { subject }, "科目更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::SubjectNotFound, "科目不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新科目失败: {e}"),
            )),
        ),
    }
}
