use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ExamType, PaperStatus};

// 上传试卷的表单字段（multipart 中与文件一同提交）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct UploadPaperMeta {
    pub subject_id: i64,
    pub exam_type: ExamType,
    /// 套卷标识（如 "A"、"B"）
    pub set_label: String,
    /// 截止时间（RFC3339，可选）
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

// 驳回试卷请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct RejectPaperRequest {
    /// 驳回意见，必填且不能为空白
    pub feedback: String,
}

// 选定试卷请求（级联作用于同 (subject_id, exam_type) 分组）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct SelectPaperRequest {
    pub subject_id: i64,
    pub exam_type: ExamType,
}

// 内部使用：写入试卷行（文件已落盘校验完毕后）
#[derive(Debug, Clone)]
pub struct CreatePaperData {
    pub subject_id: i64,
    pub exam_type: ExamType,
    pub set_label: String,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub uploaded_by: i64,
    pub file_path: String,
}

// 教师自己的投稿列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct MyPapersQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    pub exam_type: Option<ExamType>,
    /// 默认 false：被驳回的试卷不出现在默认视图中（应以新版本重新上传）
    #[serde(default)]
    pub include_rejected: bool,
}

// 系主任评审列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct ReviewListQuery {
    pub subject_id: Option<i64>,
    pub exam_type: Option<ExamType>,
    pub status: Option<PaperStatus>,
}
