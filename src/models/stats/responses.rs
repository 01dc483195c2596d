use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::audit::responses::AuditLogItem;

// 按角色统计的用户数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}

// 按状态统计的试卷数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

// 管理员总览统计
//
// 纯只读聚合；空库（零院系、零试卷）必须正常返回全零结果。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct StatsOverviewResponse {
    pub users_by_role: Vec<RoleCount>,
    pub papers_by_status: Vec<StatusCount>,
    pub department_count: i64,
    pub subject_count: i64,
    pub recent_audit_logs: Vec<AuditLogItem>,
}
