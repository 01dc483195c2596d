use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{ExamListQuery, ScheduleExamRequest, UpdateExamStatusRequest};
use crate::models::users::entities::AppRole;
use crate::services::ExamService;

// 懒加载的全局 ExamService 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

// 排考
pub async fn schedule_exam(
    req: HttpRequest,
    body: web::Json<ScheduleExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.schedule_exam(body.into_inner(), &req).await
}

// 考试列表
pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(query.into_inner(), &req).await
}

// 更新考试状态
pub async fn update_exam_status(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateExamStatusRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam_status(path.into_inner(), body.into_inner(), &req)
        .await
}

// 配置路由（排考仅限考务中心）
pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(AppRole::exam_cell_roles()))
                    .route("", web::post().to(schedule_exam))
                    .route("", web::get().to(list_exams))
                    .route("/{id}/status", web::put().to(update_exam_status)),
            ),
    );
}
