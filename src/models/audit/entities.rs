use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 审计动作动词（封闭集合，新动作需同步更新统计页展示）
pub mod actions {
    pub const UPLOAD: &str = "upload";
    pub const APPROVE: &str = "approve";
    pub const REJECT: &str = "reject";
    pub const SELECT: &str = "select";
    pub const USER_CREATE: &str = "user_create";
    pub const USER_UPDATE: &str = "user_update";
    pub const USER_DELETE: &str = "user_delete";
    pub const ROSTER_ADD: &str = "roster_add";
    pub const ROSTER_REMOVE: &str = "roster_remove";
    pub const BROADCAST: &str = "broadcast";
    pub const EXAM_SCHEDULE: &str = "exam_schedule";
}

// 审计日志条目（只追加）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
pub struct AuditLogEntry {
    pub id: i64,
    pub actor_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    #[ts(type = "Record<string, unknown> | null")]
    pub details: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
