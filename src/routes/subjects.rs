use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subjects::requests::{
    AssignTeacherRequest, CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest,
};
use crate::services::SubjectService;

// 懒加载的全局 SubjectService 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

// 科目列表（登录用户均可读）
pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListQuery>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(query.into_inner(), &req).await
}

// 当前教师被分配的科目
pub async fn list_my_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_my_subjects(&req).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.create_subject(body.into_inner(), &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(path.into_inner(), &req).await
}

// 科目教师分配
pub async fn list_assigned_teachers(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .list_assigned_teachers(path.into_inner(), &req)
        .await
}

pub async fn assign_teacher(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<AssignTeacherRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .assign_teacher(path.into_inner(), body.into_inner(), &req)
        .await
}

pub async fn unassign_teacher(
    req: HttpRequest,
    path: web::Path<(i64, i64)>, // (subject_id, teacher_id)
) -> ActixResult<HttpResponse> {
    let (subject_id, teacher_id) = path.into_inner();
    SUBJECT_SERVICE
        .unassign_teacher(subject_id, teacher_id, &req)
        .await
}

// 配置路由
//
// 列表对所有登录用户开放（上传/广播的科目选择用），
// 写操作与分配管理在服务层校验 admin。
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_subjects))
            .route("", web::post().to(create_subject))
            .route("/my", web::get().to(list_my_subjects))
            .route("/{id}", web::put().to(update_subject))
            .route("/{id}", web::delete().to(delete_subject))
            .route("/{id}/teachers", web::get().to(list_assigned_teachers))
            .route("/{id}/teachers", web::post().to(assign_teacher))
            .route(
                "/{id}/teachers/{teacher_id}",
                web::delete().to(unassign_teacher),
            ),
    );
}
