use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{ExamType, Paper, PaperStatus};
use crate::models::PaginationInfo;

// 单份试卷响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct PaperResponse {
    pub paper: Paper,
}

// 教师自己的投稿列表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct PaperListResponse {
    pub items: Vec<Paper>,
    pub pagination: PaginationInfo,
}

// 评审视图中的一份匿名投稿
//
// 有意不包含 uploaded_by：匿名化是读取时的投影，系主任视图
// 在类型层面就拿不到上传者身份。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct AnonymousSubmission {
    pub paper_id: i64,
    /// 组内顺序标签（"Submission 1"、"Submission 2"…），每次查询重新计算
    pub anonymous_label: String,
    pub set_label: String,
    pub status: PaperStatus,
    pub version: i32,
    pub is_selected: bool,
    pub has_file: bool,
    pub feedback: Option<String>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

// 评审视图中的一个分组（科目 + 考试类型）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct ReviewGroup {
    pub subject_id: i64,
    pub subject_name: String,
    pub subject_code: String,
    pub exam_type: ExamType,
    pub submissions: Vec<AnonymousSubmission>,
}

// 系主任评审列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct ReviewListResponse {
    pub groups: Vec<ReviewGroup>,
}

// 考务中心视角的已锁定试卷
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct LockedPaperItem {
    pub paper: Paper,
    pub subject_name: String,
    pub subject_code: String,
    pub department_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct LockedPaperListResponse {
    pub items: Vec<LockedPaperItem>,
}

// 选定结果：目标试卷锁定，同组多少份被级联驳回
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct SelectPaperResponse {
    pub paper: Paper,
    pub cascade_rejected: i64,
}
