use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::AppRole;
use crate::models::users::requests::AddTeacherRequest;
use crate::services::RosterService;

// 懒加载的全局 RosterService 实例
static ROSTER_SERVICE: Lazy<RosterService> = Lazy::new(RosterService::new_lazy);

// 本系教师名册
pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.list_teachers(&req).await
}

// 添加教师
pub async fn add_teacher(
    req: HttpRequest,
    body: web::Json<AddTeacherRequest>,
) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.add_teacher(body.into_inner(), &req).await
}

// 移出教师
pub async fn remove_teacher(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.remove_teacher(path.into_inner(), &req).await
}

// 配置路由（名册管理仅限系主任）
pub fn configure_roster_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/department/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(AppRole::hod_roles()))
                    .route("", web::get().to(list_teachers))
                    .route("", web::post().to(add_teacher))
                    .route("/{id}", web::delete().to(remove_teacher)),
            ),
    );
}
