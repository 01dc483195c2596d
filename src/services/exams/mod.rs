pub mod list;
pub mod schedule;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{ExamListQuery, ScheduleExamRequest, UpdateExamStatusRequest};
use crate::storage::Storage;

/// 考务中心排考服务（路由层已用 RequireRole(ExamCell) 把关）
pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    // 基于已锁定试卷排考
    pub async fn schedule_exam(
        &self,
        body: ScheduleExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedule::schedule_exam(self, body, request).await
    }

    // 考试列表
    pub async fn list_exams(
        &self,
        query: ExamListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, query, request).await
    }

    // 更新考试状态
    pub async fn update_exam_status(
        &self,
        exam_id: i64,
        body: UpdateExamStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_exam_status(self, exam_id, body, request).await
    }
}
