use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::actions;
use crate::models::exams::{
    requests::{CreateExamData, ScheduleExamRequest},
    responses::ExamResponse,
};
use crate::models::papers::entities::PaperStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;

/// 排考
/// POST /exams
///
/// 只有已锁定且被选定的试卷可以排考；科目与考试类型从试卷带出。
pub async fn schedule_exam(
    service: &ExamService,
    body: ScheduleExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if body.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, "考试标题不能为空")));
    }

    if body.duration_minutes <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "考试时长必须为正数",
        )));
    }

    let storage = service.get_storage(request);

    let paper = match storage.get_paper_by_id(body.paper_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::PaperNotFound, "试卷不存在")));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询试卷失败: {e}"),
                )),
            );
        }
    };

    if paper.status != PaperStatus::Locked || !paper.is_selected {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamPaperNotSelectable,
            "只有已锁定且被选定的试卷可以排考",
        )));
    }

    match storage
        .create_exam(CreateExamData {
            subject_id: paper.subject_id,
            exam_type: paper.exam_type.clone(),
            paper_id: paper.id,
            title: body.title.trim().to_string(),
            scheduled_at: body.scheduled_at,
            duration_minutes: body.duration_minutes,
            created_by: user_id,
        })
        .await
    {
        Ok(exam) => {
            audit::record(
                &storage,
                user_id,
                actions::EXAM_SCHEDULE,
                "exam",
                Some(exam.id),
                Some(serde_json::json!({
                    "paper_id": exam.paper_id,
                    "subject_id": exam.subject_id,
                    "scheduled_at": exam.scheduled_at.to_rfc3339(),
                })),
            )
            .await;

            Ok(HttpResponse::Created().json(ApiResponse::success(ExamResponse { exam }, "排考成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("排考失败: {e}"),
            )),
        ),
    }
}
