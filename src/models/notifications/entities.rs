use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知级别
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationType {
    Info,
    Warning,
    Critical,
    Success,
}

impl<'de> Deserialize<'de> for NotificationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<NotificationType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的通知级别: '{s}'. 支持的级别: info, warning, critical, success"
            ))
        })
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Info => write!(f, "info"),
            NotificationType::Warning => write!(f, "warning"),
            NotificationType::Critical => write!(f, "critical"),
            NotificationType::Success => write!(f, "success"),
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(NotificationType::Info),
            "warning" => Ok(NotificationType::Warning),
            "critical" => Ok(NotificationType::Critical),
            "success" => Ok(NotificationType::Success),
            _ => Err(format!("Invalid notification type: {s}")),
        }
    }
}

// 通知实体（扇出后每接收者一行，已读状态独立）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub sender_id: Option<i64>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
