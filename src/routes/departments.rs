use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::departments::requests::{CreateDepartmentRequest, UpdateDepartmentRequest};
use crate::services::DepartmentService;

// 懒加载的全局 DepartmentService 实例
static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

// 院系列表（登录用户均可读，下拉选择用）
pub async fn list_departments(req: HttpRequest) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.list_departments(&req).await
}

pub async fn create_department(
    req: HttpRequest,
    body: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(body.into_inner(), &req)
        .await
}

pub async fn update_department(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn delete_department(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .delete_department(path.into_inner(), &req)
        .await
}

// 配置路由
//
// 列表对所有登录用户开放（下拉选择用），写操作在服务层校验 admin，
// 读写共用路径时无法按角色拆分中间件作用域。
pub fn configure_department_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_departments))
            .route("", web::post().to(create_department))
            .route("/{id}", web::put().to(update_department))
            .route("/{id}", web::delete().to(delete_department)),
    );
}
