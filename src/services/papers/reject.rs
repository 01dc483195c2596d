use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lifecycle::{self, ActorContext, PaperAction};
use super::{PaperService, load_review_target};
use crate::models::audit::entities::actions;
use crate::models::papers::requests::RejectPaperRequest;
use crate::models::papers::responses::PaperResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;

/// 驳回试卷：pending_review → rejected
/// POST /papers/{id}/reject
pub async fn reject_paper(
    service: &PaperService,
    request: &HttpRequest,
    paper_id: i64,
    body: RejectPaperRequest,
) -> ActixResult<HttpResponse> {
    // 驳回意见必填，空白意见在任何存储调用之前拒绝
    let feedback = match lifecycle::validate_feedback(&body.feedback) {
        Ok(f) => f.to_string(),
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::FeedbackRequired, msg)));
        }
    };

    let storage = service.get_storage(request);

    let (user, paper, department_id) = match load_review_target(&storage, request, paper_id).await
    {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };

    let actor = ActorContext {
        user_id: user.id,
        role: user.role.clone(),
        department_id: user.department_id,
    };

    if let Err(deny) = lifecycle::authorize(PaperAction::Reject, &actor, department_id) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, deny.message())));
    }

    if let Err(deny) = lifecycle::check_transition(&paper.status, PaperAction::Reject) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            deny.message(),
        )));
    }

    match storage.reject_paper(paper_id, &feedback).await {
        Ok(Some(paper)) => {
            audit::record(
                &storage,
                user.id,
                actions::REJECT,
                "paper",
                Some(paper.id),
                Some(serde_json::json!({
                    "subject_id": paper.subject_id,
                    "exam_type": paper.exam_type.to_string(),
                    "feedback": feedback,
                })),
            )
            .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(PaperResponse { paper }, "已驳回")))
        }
        Ok(None) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            "试卷状态已变化，无法驳回",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("驳回失败: {e}"),
            )),
        ),
    }
}
