use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaperService;
use crate::middlewares::RequireJWT;
use crate::models::papers::requests::MyPapersQuery;
use crate::models::{ApiResponse, ErrorCode};

/// 教师自己的投稿列表
/// GET /papers/my
///
/// 默认视图不含 rejected 的试卷（被驳回的应以新版本重新上传），
/// 带 include_rejected=true 时才展示完整历史。
pub async fn list_my_papers(
    service: &PaperService,
    request: &HttpRequest,
    query: MyPapersQuery,
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

    match storage.list_my_papers(user_id, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询投稿列表失败: {e}"),
            )),
        ),
    }
}
