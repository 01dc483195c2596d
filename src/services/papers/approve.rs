use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lifecycle::{self, ActorContext, PaperAction};
use super::{PaperService, load_review_target};
use crate::models::audit::entities::actions;
use crate::models::papers::responses::PaperResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;

/// 审批试卷：pending_review → approved
/// POST /papers/{id}/approve
pub async fn approve_paper(
    service: &PaperService,
    request: &HttpRequest,
    paper_id: i64,
) -> ActixResult<HttpResponse> {
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

    // 授权矩阵：只有本院系系主任可以审批
    if let Err(deny) = lifecycle::authorize(PaperAction::Approve, &actor, department_id) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, deny.message())));
    }

    // 状态转移表校验（数据库层还会再做一次条件更新）
    if let Err(deny) = lifecycle::check_transition(&paper.status, PaperAction::Approve) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            deny.message(),
        )));
    }

    match storage.approve_paper(paper_id, user.id).await {
        Ok(Some(paper)) => {
            audit::record(
                &storage,
                user.id,
                actions::APPROVE,
                "paper",
                Some(paper.id),
                Some(serde_json::json!({
                    "subject_id": paper.subject_id,
                    "exam_type": paper.exam_type.to_string(),
                })),
            )
            .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(PaperResponse { paper }, "审批通过")))
        }
        // 条件更新 0 行：状态已被并发修改
        Ok(None) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            "试卷状态已变化，无法审批",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("审批失败: {e}"),
            )),
        ),
    }
}
