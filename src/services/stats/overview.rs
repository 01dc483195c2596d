use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StatsService;
use crate::models::stats::responses::StatsOverviewResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 最近审计条目的条数
const RECENT_AUDIT_LIMIT: u64 = 10;

/// 管理员总览
/// GET /stats/overview
///
/// 纯只读聚合，空库（零院系、零试卷）返回全零结果而不是报错。
pub async fn overview(service: &StatsService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let users_by_role = match storage.count_users_by_role().await {
        Ok(v) => v,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("按角色统计失败: {e}"),
                )),
            );
        }
    };

    let papers_by_status = match storage.count_papers_by_status().await {
        Ok(v) => v,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("按状态统计失败: {e}"),
                )),
            );
        }
    };

    let department_count = match storage.count_departments().await {
        Ok(v) => v,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("统计院系数量失败: {e}"),
                )),
            );
        }
    };

    let subject_count = match storage.count_subjects().await {
        Ok(v) => v,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("统计科目数量失败: {e}"),
                )),
            );
        }
    };

    let recent_audit_logs = match storage.list_recent_audit_logs(RECENT_AUDIT_LIMIT).await {
        Ok(v) => v,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询审计日志失败: {e}"),
                )),
            );
        }
    };

    let response = StatsOverviewResponse {
        users_by_role,
        papers_by_status,
        department_count,
        subject_count,
        recent_audit_logs,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
