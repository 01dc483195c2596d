use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::AuditLogEntry;

// 审计条目 + 操作者姓名（二次查询补全）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/audit.ts")]
pub struct AuditLogItem {
    #[serde(flatten)]
    pub entry: AuditLogEntry,
    /// 操作者姓名；账号已删除时为 None
    pub actor_name: Option<String>,
}
