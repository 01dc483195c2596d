use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::AppRole;
use crate::services::StatsService;

// 懒加载的全局 StatsService 实例
static STATS_SERVICE: Lazy<StatsService> = Lazy::new(StatsService::new_lazy);

// 管理员总览
pub async fn overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.overview(&req).await
}

// 配置路由（统计仅限 admin）
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/stats")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(AppRole::admin_roles()))
                    .route("/overview", web::get().to(overview)),
            ),
    );
}
