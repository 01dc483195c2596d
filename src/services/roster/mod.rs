pub mod add;
pub mod list;
pub mod remove;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::AddTeacherRequest;
use crate::storage::Storage;

/// 系主任的本系教师名册管理（路由层已用 RequireRole(Hod) 把关）
///
/// 只允许操作 teacher 角色且属于本系（或尚未挂系）的账号，
/// 其他角色或外系账号一律 403。
pub struct RosterService {
    storage: Option<Arc<dyn Storage>>,
}

impl RosterService {
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

    // 本系教师列表
    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request).await
    }

    // 添加教师（已有账号挂系，或新建教师账号）
    pub async fn add_teacher(
        &self,
        body: AddTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        add::add_teacher(self, body, request).await
    }

    // 移出教师（脱离本系并清空科目分配）
    pub async fn remove_teacher(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        remove::remove_teacher(self, teacher_id, request).await
    }
}
