pub mod assign;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::{
    AssignTeacherRequest, CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest,
};
use crate::storage::Storage;

/// 科目管理服务（管理员维护科目与教师分配）
pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
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

    pub async fn create_subject(
        &self,
        body: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, body, request).await
    }

    pub async fn list_subjects(
        &self,
        query: SubjectListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, query, request).await
    }

    // 当前教师被分配的科目
    pub async fn list_my_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_subjects(self, request).await
    }

    pub async fn update_subject(
        &self,
        id: i64,
        body: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, id, body, request).await
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, id, request).await
    }

    // 分配教师到科目
    pub async fn assign_teacher(
        &self,
        subject_id: i64,
        body: AssignTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_teacher(self, subject_id, body, request).await
    }

    // 取消教师科目分配
    pub async fn unassign_teacher(
        &self,
        subject_id: i64,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::unassign_teacher(self, subject_id, teacher_id, request).await
    }

    // 科目的已分配教师
    pub async fn list_assigned_teachers(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::list_assigned_teachers(self, subject_id, request).await
    }
}
