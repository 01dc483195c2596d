//! 审计日志辅助
//!
//! 审计写入是尽力而为的：失败时在日志管道里告警，
//! 绝不回滚或阻塞主操作（试卷状态的正确性优先于日志）。

use std::sync::Arc;

use tracing::warn;

use crate::storage::Storage;

pub async fn record(
    storage: &Arc<dyn Storage>,
    actor_id: i64,
    action: &str,
    entity_type: &str,
    entity_id: Option<i64>,
    details: Option<serde_json::Value>,
) {
    if let Err(e) = storage
        .insert_audit_log(actor_id, action, entity_type, entity_id, details)
        .await
    {
        warn!(
            "审计日志写入失败 (action={}, entity_type={}, entity_id={:?}): {}",
            action, entity_type, entity_id, e
        );
    }
}
