use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lifecycle::{self, ActorContext, PaperAction};
use super::{PaperService, load_review_target};
use crate::errors::QPSystemError;
use crate::models::audit::entities::actions;
use crate::models::papers::requests::SelectPaperRequest;
use crate::models::papers::responses::SelectPaperResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;

/// 选定试卷：approved → locked，级联作用于同分组
/// POST /papers/{id}/select
///
/// 三步级联（清选定标记 → 锁定目标 → 强制驳回落选的 approved 兄弟）
/// 由存储层在单个事务内执行；事务内会重新校验目标状态，
/// 两个系主任并发选定同组不同试卷时只有一个会成功。
pub async fn select_paper(
    service: &PaperService,
    request: &HttpRequest,
    paper_id: i64,
    body: SelectPaperRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (user, paper, department_id) = match load_review_target(&storage, request, paper_id).await
    {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };

    // 请求声明的分组必须与试卷实际归属一致
    if paper.subject_id != body.subject_id || paper.exam_type != body.exam_type {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "试卷不属于指定的科目与考试类型分组",
        )));
    }

    let actor = ActorContext {
        user_id: user.id,
        role: user.role.clone(),
        department_id: user.department_id,
    };

    if let Err(deny) = lifecycle::authorize(PaperAction::Select, &actor, department_id) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, deny.message())));
    }

    if let Err(deny) = lifecycle::check_transition(&paper.status, PaperAction::Select) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            deny.message(),
        )));
    }

    let exam_type = body.exam_type.to_string();

    // 基于分组现状预演级联计划；真正的执行连同状态复核在
    // 存储层事务内完成
    let group = match storage.list_papers_in_group(body.subject_id, &exam_type).await {
        Ok(group) => group,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询分组试卷失败: {e}"),
                )),
            );
        }
    };

    if let Err(deny) = lifecycle::plan_selection(&group, paper_id) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            deny.message(),
        )));
    }

    match storage
        .select_paper(paper_id, body.subject_id, &exam_type)
        .await
    {
        Ok((paper, cascade_rejected)) => {
            audit::record(
                &storage,
                user.id,
                actions::SELECT,
                "paper",
                Some(paper.id),
                Some(serde_json::json!({
                    "subject_id": paper.subject_id,
                    "exam_type": exam_type,
                    "cascade_rejected": cascade_rejected,
                })),
            )
            .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SelectPaperResponse {
                    paper,
                    cascade_rejected: cascade_rejected as i64,
                },
                "试卷已选定并锁定",
            )))
        }
        // 事务内状态校验失败：并发修改或重复选定
        Err(e @ QPSystemError::InvalidTransition(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::InvalidTransition, e.message()),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("选定失败: {e}"),
            )),
        ),
    }
}
