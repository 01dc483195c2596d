//! 审计日志存储操作
//!
//! 只有插入和按时间倒序读取两条路径，没有更新或删除。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::audit_logs::{ActiveModel, Column, Entity as AuditLogs};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{QPSystemError, Result};
use crate::models::audit::responses::AuditLogItem;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 追加一条审计日志
    pub async fn insert_audit_log_impl(
        &self,
        actor_id: i64,
        action: &str,
        entity_type: &str,
        entity_id: Option<i64>,
        details: Option<serde_json::Value>,
    ) -> Result<()> {
        let details_json = match details {
            Some(value) => Some(serde_json::to_string(&value)?),
            None => None,
        };

        let model = ActiveModel {
            actor_id: Set(actor_id),
            action: Set(action.to_string()),
            entity_type: Set(entity_type.to_string()),
            entity_id: Set(entity_id),
            details: Set(details_json),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("写入审计日志失败: {e}")))?;

        Ok(())
    }

    /// 最近 N 条审计日志，附操作者姓名（二次批量查询补全）
    pub async fn list_recent_audit_logs_impl(&self, limit: u64) -> Result<Vec<AuditLogItem>> {
        let entries = AuditLogs::find()
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询审计日志失败: {e}")))?;

        // 批量查询操作者姓名
        let actor_ids: Vec<i64> = entries
            .iter()
            .map(|e| e.actor_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(actor_ids))
            .all(&self.db)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("查询操作者信息失败: {e}")))?;

        let name_map: HashMap<i64, String> =
            users.into_iter().map(|u| (u.id, u.full_name)).collect();

        Ok(entries
            .into_iter()
            .map(|e| {
                let actor_name = name_map.get(&e.actor_id).cloned();
                AuditLogItem {
                    entry: e.into_audit_entry(),
                    actor_name,
                }
            })
            .collect())
    }
}
