use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::papers::requests::{
    MyPapersQuery, RejectPaperRequest, ReviewListQuery, SelectPaperRequest,
};
use crate::models::users::entities::AppRole;
use crate::services::PaperService;

// 懒加载的全局 PaperService 实例
static PAPER_SERVICE: Lazy<PaperService> = Lazy::new(PaperService::new_lazy);

// 上传试卷（multipart：subject_id / exam_type / set_label / deadline + file）
pub async fn upload_paper(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    PAPER_SERVICE.upload_paper(&req, payload).await
}

// 我的投稿
pub async fn list_my_papers(
    req: HttpRequest,
    query: web::Query<MyPapersQuery>,
) -> ActixResult<HttpResponse> {
    PAPER_SERVICE.list_my_papers(&req, query.into_inner()).await
}

// 匿名评审列表
pub async fn list_review_papers(
    req: HttpRequest,
    query: web::Query<ReviewListQuery>,
) -> ActixResult<HttpResponse> {
    PAPER_SERVICE
        .list_review_papers(&req, query.into_inner())
        .await
}

// 审批
pub async fn approve_paper(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    PAPER_SERVICE.approve_paper(&req, path.into_inner()).await
}

// 驳回
pub async fn reject_paper(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RejectPaperRequest>,
) -> ActixResult<HttpResponse> {
    PAPER_SERVICE
        .reject_paper(&req, path.into_inner(), body.into_inner())
        .await
}

// 选定并锁定
pub async fn select_paper(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SelectPaperRequest>,
) -> ActixResult<HttpResponse> {
    PAPER_SERVICE
        .select_paper(&req, path.into_inner(), body.into_inner())
        .await
}

// 已锁定试卷（考务中心）
pub async fn list_locked_papers(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAPER_SERVICE.list_locked_papers(&req).await
}

// 下载试卷文件
pub async fn download_paper(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    PAPER_SERVICE.download_paper(&req, path.into_inner()).await
}

// 配置路由
//
// 上传仅限教师；审批/驳回/选定仅限系主任（院系辖域在服务层再校验）；
// 锁定卷列表仅限考务中心；下载的细粒度可见性在服务层判定。
pub fn configure_paper_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/papers")
            .wrap(middlewares::RequireJWT)
            .route("/{id}/file", web::get().to(download_paper))
            .service(
                web::scope("/my")
                    .wrap(middlewares::RequireRole::new_any(AppRole::teacher_roles()))
                    .route("", web::get().to(list_my_papers)),
            )
            .service(
                web::scope("/review")
                    .wrap(middlewares::RequireRole::new_any(AppRole::hod_roles()))
                    .route("", web::get().to(list_review_papers)),
            )
            .service(
                web::scope("/locked")
                    .wrap(middlewares::RequireRole::new_any(AppRole::exam_cell_roles()))
                    .route("", web::get().to(list_locked_papers)),
            )
            .service(
                web::scope("/upload")
                    .wrap(middlewares::RateLimit::paper_upload())
                    .wrap(middlewares::RequireRole::new_any(AppRole::teacher_roles()))
                    .route("", web::post().to(upload_paper)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(AppRole::hod_roles()))
                    .route("/{id}/approve", web::post().to(approve_paper))
                    .route("/{id}/reject", web::post().to(reject_paper))
                    .route("/{id}/select", web::post().to(select_paper)),
            ),
    );
}
