pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::departments::requests::{CreateDepartmentRequest, UpdateDepartmentRequest};
use crate::storage::Storage;

/// 院系管理服务（管理员）
pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
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

    pub async fn create_department(
        &self,
        body: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, body, request).await
    }

    pub async fn list_departments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_departments(self, request).await
    }

    pub async fn update_department(
        &self,
        id: i64,
        body: UpdateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, id, body, request).await
    }

    pub async fn delete_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, id, request).await
    }
}
