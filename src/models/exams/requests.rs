use serde::Deserialize;
use ts_rs::TS;

use super::entities::ExamStatus;

// 排考请求（试卷必须已锁定且被选定）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ScheduleExamRequest {
    pub paper_id: i64,
    pub title: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
}

// 内部使用：写入考试行（科目与考试类型取自被选定的试卷）
#[derive(Debug, Clone)]
pub struct CreateExamData {
    pub subject_id: i64,
    pub exam_type: crate::models::papers::entities::ExamType,
    pub paper_id: i64,
    pub title: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub created_by: i64,
}

// 更新考试状态请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamStatusRequest {
    pub status: ExamStatus,
}

// 考试列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListQuery {
    pub subject_id: Option<i64>,
    pub status: Option<ExamStatus>,
}
