use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::PaperService;
use super::lifecycle;
use crate::middlewares::RequireJWT;
use crate::models::papers::requests::ReviewListQuery;
use crate::models::papers::responses::ReviewListResponse;
use crate::models::subjects::requests::SubjectListQuery;
use crate::models::{ApiResponse, ErrorCode};

/// 系主任的匿名评审列表
/// GET /papers/review
///
/// 存储层返回本院系试卷的原始行，这里做匿名化投影：按
/// (科目, 考试类型) 分组并赋 "Submission N" 顺序标签。
/// 响应类型不携带 uploaded_by，上传者身份不会流到系主任端。
pub async fn list_review_papers(
    service: &PaperService,
    request: &HttpRequest,
    query: ReviewListQuery,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    // 系主任必须有院系归属才有评审辖域
    let Some(department_id) = user.department_id else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "当前账号未关联院系",
        )));
    };

    let storage = service.get_storage(request);

    let papers = match storage.list_department_papers(department_id, query).await {
        Ok(papers) => papers,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评审试卷失败: {e}"),
                )),
            );
        }
    };

    // 补科目信息用于分组标题
    let subjects = match storage
        .list_subjects(SubjectListQuery {
            department_id: Some(department_id),
            semester: None,
        })
        .await
    {
        Ok(subjects) => subjects,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询科目信息失败: {e}"),
                )),
            );
        }
    };

    let subject_map: HashMap<i64, _> = subjects.into_iter().map(|s| (s.id, s)).collect();
    let groups = lifecycle::build_review_groups(papers, &subject_map);

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReviewListResponse { groups }, "查询成功")))
}
