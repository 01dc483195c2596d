use serde::Deserialize;
use ts_rs::TS;

use super::entities::NotificationType;
use crate::models::PaginationQuery;

// 广播目标模式
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum BroadcastTargetMode {
    /// 本系全部教师
    Department,
    /// 指定科目的任课教师（取并集去重）
    Subjects,
}

// 系主任广播请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct BroadcastRequest {
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub target_mode: BroadcastTargetMode,
    /// target_mode = subjects 时必填
    pub subject_ids: Option<Vec<i64>>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 内部使用：创建单条通知
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub sender_id: Option<i64>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 通知列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub unread_only: Option<bool>,
}
