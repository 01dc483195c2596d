use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{PaperService, load_review_target};
use crate::config::AppConfig;
use crate::errors::QPSystemError;
use crate::models::papers::entities::PaperStatus;
use crate::models::users::entities::AppRole;
use crate::models::{ApiResponse, ErrorCode};

/// 下载试卷文件
/// GET /papers/{id}/file
///
/// 可见性：上传者本人、试卷所属院系的系主任、考务中心（仅锁定卷）。
/// admin 被明确排除在试卷内容之外（职责分离）。
pub async fn download_paper(
    service: &PaperService,
    request: &HttpRequest,
    paper_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (user, paper, department_id) = match load_review_target(&storage, request, paper_id).await
    {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };

    let allowed = match user.role {
        AppRole::Teacher => paper.uploaded_by == user.id,
        AppRole::Hod => user.department_id == Some(department_id),
        AppRole::ExamCell => paper.status == PaperStatus::Locked,
        // admin 管账号不管试卷内容
        AppRole::Admin => false,
    };

    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PaperPermissionDenied,
            "没有查看该试卷文件的权限",
        )));
    }

    let Some(stored_name) = paper.file_path else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "试卷文件不存在",
        )));
    };

    let config = AppConfig::get();
    let file_path = format!("{}/{}", config.upload.dir, stored_name);

    if !Path::new(&file_path).exists() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "试卷文件不存在",
        )));
    }

    let mut file = match File::open(&file_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("{:?}", QPSystemError::file_operation(format!("{e:?}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File open failed",
                )),
            );
        }
    };

    let mut buf = Vec::new();
    if file.read_to_end(&mut buf).is_err() {
        tracing::error!("{:?}", QPSystemError::file_operation("File read failed"));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "File read failed",
            )),
        );
    }

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"paper-{}-v{}.pdf\"",
                paper.id, paper.version
            ),
        ))
        .body(buf))
}
