pub mod broadcast;
pub mod count;
pub mod delete;
pub mod list;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::{BroadcastRequest, NotificationListQuery};
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 系主任广播（按系或按科目扇出）
    pub async fn broadcast(
        &self,
        body: BroadcastRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        broadcast::broadcast(self, body, request).await
    }

    // 我的通知列表
    pub async fn list_notifications(
        &self,
        query: NotificationListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, query, request).await
    }

    // 未读数量
    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        count::unread_count(self, request).await
    }

    // 标记单条已读
    pub async fn mark_as_read(
        &self,
        notification_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        read::mark_as_read(self, notification_id, request).await
    }

    // 全部标记已读
    pub async fn mark_all_as_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        read::mark_all_as_read(self, request).await
    }

    // 删除自己的通知
    pub async fn delete_notification(
        &self,
        notification_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notification(self, notification_id, request).await
    }
}
