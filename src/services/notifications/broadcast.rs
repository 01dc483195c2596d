use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::actions;
use crate::models::notifications::{
    requests::{BroadcastRequest, BroadcastTargetMode, CreateNotificationRequest},
    responses::BroadcastResponse,
};
use crate::models::subjects::requests::SubjectListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;

/// 系主任广播
/// POST /notifications/broadcast
///
/// 接收者解析：
/// - department 模式：本系全部教师角色用户
/// - subjects 模式：所选科目的任课教师并集（去重，跨科目只收一条）
///
/// 扇出为每接收者一行通知（已读状态独立），这是有意的反范式化。
/// 解析结果为空时不写任何行，返回 recipient_count = 0 的错误响应。
pub async fn broadcast(
    service: &NotificationService,
    body: BroadcastRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let sender = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let Some(department_id) = sender.department_id else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "当前账号未关联院系",
        )));
    };

    if body.title.trim().is_empty() || body.message.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "通知标题和内容不能为空",
        )));
    }

    let storage = service.get_storage(request);

    // 解析接收者
    let recipient_ids: Vec<i64> = match body.target_mode {
        BroadcastTargetMode::Department => {
            match storage.list_teacher_ids_in_department(department_id).await {
                Ok(ids) => ids,
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("解析接收者失败: {e}"),
                        ),
                    ));
                }
            }
        }
        BroadcastTargetMode::Subjects => {
            let subject_ids = body.subject_ids.clone().unwrap_or_default();

            // 所选科目必须全部属于本系
            let own_subjects = match storage
                .list_subjects(SubjectListQuery {
                    department_id: Some(department_id),
                    semester: None,
                })
                .await
            {
                Ok(subjects) => subjects,
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询科目失败: {e}"),
                        ),
                    ));
                }
            };
            let own_ids: HashSet<i64> = own_subjects.into_iter().map(|s| s.id).collect();
            if subject_ids.iter().any(|id| !own_ids.contains(id)) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能按本系科目广播",
                )));
            }

            match storage.list_teacher_ids_for_subjects(&subject_ids).await {
                Ok(ids) => ids,
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("解析接收者失败: {e}"),
                        ),
                    ));
                }
            }
        }
    };

    // 空接收者集合：不写任何行
    if recipient_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::NotificationNoRecipients,
            BroadcastResponse { recipient_count: 0 },
            "没有匹配的接收者，未发送任何通知",
        )));
    }

    let reqs: Vec<CreateNotificationRequest> = recipient_ids
        .iter()
        .map(|&user_id| CreateNotificationRequest {
            user_id,
            sender_id: Some(sender.id),
            notification_type: body.notification_type.clone(),
            title: body.title.clone(),
            message: body.message.clone(),
            expires_at: body.expires_at,
        })
        .collect();

    match storage.create_notifications_batch(reqs).await {
        Ok(count) => {
            audit::record(
                &storage,
                sender.id,
                actions::BROADCAST,
                "notification",
                None,
                Some(serde_json::json!({
                    "target_mode": format!("{:?}", body.target_mode),
                    "recipient_count": count,
                })),
            )
            .await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BroadcastResponse {
                    recipient_count: count as i64,
                },
                format!("通知已发送给 {count} 位教师"),
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("发送通知失败: {e}"),
            )),
        ),
    }
}
