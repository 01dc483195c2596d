use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notifications::requests::{BroadcastRequest, NotificationListQuery};
use crate::models::users::entities::AppRole;
use crate::services::NotificationService;

// 懒加载的全局 NotificationService 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// 我的通知列表
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(query.into_inner(), &req)
        .await
}

// 未读数量
pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.unread_count(&req).await
}

// 标记单条已读
pub async fn mark_as_read(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .mark_as_read(path.into_inner(), &req)
        .await
}

// 全部标记已读
pub async fn mark_all_as_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_as_read(&req).await
}

// 删除通知
pub async fn delete_notification(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .delete_notification(path.into_inner(), &req)
        .await
}

// 系主任广播
pub async fn broadcast(
    req: HttpRequest,
    body: web::Json<BroadcastRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.broadcast(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("/broadcast")
                    .wrap(middlewares::RateLimit::broadcast())
                    .wrap(middlewares::RequireRole::new_any(AppRole::hod_roles()))
                    .route("", web::post().to(broadcast)),
            )
            .route("", web::get().to(list_notifications))
            .route("/unread/count", web::get().to(unread_count))
            .route("/read-all", web::put().to(mark_all_as_read))
            .route("/{id}/read", web::put().to(mark_as_read))
            .route("/{id}", web::delete().to(delete_notification)),
    );
}
