pub mod approve;
pub mod download;
pub mod lifecycle;
pub mod locked;
pub mod my_submissions;
pub mod reject;
pub mod review;
pub mod select;
pub mod upload;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::papers::entities::Paper;
use crate::models::papers::requests::{
    MyPapersQuery, RejectPaperRequest, ReviewListQuery, SelectPaperRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 评审动作的公共前置：取操作者、试卷与试卷所属院系
///
/// 授权失败统一返回 403/404 响应；404 不区分"不存在"与"无权查看"，
/// 避免向越权方泄露资源是否存在。
pub(crate) async fn load_review_target(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    paper_id: i64,
) -> Result<(User, Paper, i64), HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    let paper = match storage.get_paper_by_id(paper_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::PaperNotFound,
                "试卷不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询试卷失败: {e}"),
                )),
            );
        }
    };

    let subject = match storage.get_subject_by_id(paper.subject_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "科目不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询科目失败: {e}"),
                )),
            );
        }
    };

    Ok((user, paper, subject.department_id))
}

pub struct PaperService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaperService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 上传试卷（教师）
    pub async fn upload_paper(
        &self,
        request: &HttpRequest,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_paper(self, request, payload).await
    }

    // 我的投稿列表（教师）
    pub async fn list_my_papers(
        &self,
        request: &HttpRequest,
        query: MyPapersQuery,
    ) -> ActixResult<HttpResponse> {
        my_submissions::list_my_papers(self, request, query).await
    }

    // 匿名评审列表（系主任）
    pub async fn list_review_papers(
        &self,
        request: &HttpRequest,
        query: ReviewListQuery,
    ) -> ActixResult<HttpResponse> {
        review::list_review_papers(self, request, query).await
    }

    // 审批（系主任）
    pub async fn approve_paper(
        &self,
        request: &HttpRequest,
        paper_id: i64,
    ) -> ActixResult<HttpResponse> {
        approve::approve_paper(self, request, paper_id).await
    }

    // 驳回（系主任）
    pub async fn reject_paper(
        &self,
        request: &HttpRequest,
        paper_id: i64,
        body: RejectPaperRequest,
    ) -> ActixResult<HttpResponse> {
        reject::reject_paper(self, request, paper_id, body).await
    }

    // 选定并锁定（系主任）
    pub async fn select_paper(
        &self,
        request: &HttpRequest,
        paper_id: i64,
        body: SelectPaperRequest,
    ) -> ActixResult<HttpResponse> {
        select::select_paper(self, request, paper_id, body).await
    }

    // 已锁定试卷列表（考务中心）
    pub async fn list_locked_papers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        locked::list_locked_papers(self, request).await
    }

    // 下载试卷文件
    pub async fn download_paper(
        &self,
        request: &HttpRequest,
        paper_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_paper(self, request, paper_id).await
    }
}
