use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::middlewares::RequireJWT;
use crate::models::subjects::{requests::SubjectListQuery, responses::SubjectListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_subjects(
    service: &SubjectService,
    query: SubjectListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects(query).await {
        Ok(items) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(SubjectListResponse { items }, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询科目列表失败: {e}"),
            )),
        ),
    }
}

/// 当前教师被分配的科目（上传试卷时的科目选择范围）
pub async fn list_my_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    let storage = service.get_storage(request);

    match storage.list_subjects_for_teacher(user_id).await {
        Ok(items) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(SubjectListResponse { items }, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询我的科目失败: {e}"),
            )),
        ),
    }
}
