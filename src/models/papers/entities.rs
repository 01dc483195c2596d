use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 级联驳回时写入落选试卷的固定意见文案
pub const CASCADE_REJECT_FEEDBACK: &str = "Another paper was selected for this exam";

// 试卷状态
//
// 生产路径只会走 pending_review → approved → locked 与
// pending_review → rejected，以及选定级联触发的 approved → rejected。
// draft / submitted 保留在封闭枚举中以兼容历史数据。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub enum PaperStatus {
    Draft,
    Submitted,
    PendingReview,
    Approved,
    Rejected,
    Locked,
}

impl PaperStatus {
    pub const DRAFT: &'static str = "draft";
    pub const SUBMITTED: &'static str = "submitted";
    pub const PENDING_REVIEW: &'static str = "pending_review";
    pub const APPROVED: &'static str = "approved";
    pub const REJECTED: &'static str = "rejected";
    pub const LOCKED: &'static str = "locked";
}

impl<'de> Deserialize<'de> for PaperStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<PaperStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的试卷状态: '{s}'. 支持的状态: draft, submitted, pending_review, approved, rejected, locked"
            ))
        })
    }
}

impl std::fmt::Display for PaperStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaperStatus::Draft => write!(f, "{}", PaperStatus::DRAFT),
            PaperStatus::Submitted => write!(f, "{}", PaperStatus::SUBMITTED),
            PaperStatus::PendingReview => write!(f, "{}", PaperStatus::PENDING_REVIEW),
            PaperStatus::Approved => write!(f, "{}", PaperStatus::APPROVED),
            PaperStatus::Rejected => write!(f, "{}", PaperStatus::REJECTED),
            PaperStatus::Locked => write!(f, "{}", PaperStatus::LOCKED),
        }
    }
}

impl std::str::FromStr for PaperStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PaperStatus::Draft),
            "submitted" => Ok(PaperStatus::Submitted),
            "pending_review" => Ok(PaperStatus::PendingReview),
            "approved" => Ok(PaperStatus::Approved),
            "rejected" => Ok(PaperStatus::Rejected),
            "locked" => Ok(PaperStatus::Locked),
            _ => Err(format!("Invalid paper status: {s}")),
        }
    }
}

// 考试类型
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub enum ExamType {
    MidTerm,
    EndTerm,
    Practical,
    Internal,
}

impl ExamType {
    pub const MID_TERM: &'static str = "mid_term";
    pub const END_TERM: &'static str = "end_term";
    pub const PRACTICAL: &'static str = "practical";
    pub const INTERNAL: &'static str = "internal";
}

impl<'de> Deserialize<'de> for ExamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ExamType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考试类型: '{s}'. 支持的类型: mid_term, end_term, practical, internal"
            ))
        })
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamType::MidTerm => write!(f, "{}", ExamType::MID_TERM),
            ExamType::EndTerm => write!(f, "{}", ExamType::END_TERM),
            ExamType::Practical => write!(f, "{}", ExamType::PRACTICAL),
            ExamType::Internal => write!(f, "{}", ExamType::INTERNAL),
        }
    }
}

impl std::str::FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mid_term" => Ok(ExamType::MidTerm),
            "end_term" => Ok(ExamType::EndTerm),
            "practical" => Ok(ExamType::Practical),
            "internal" => Ok(ExamType::Internal),
            _ => Err(format!("Invalid exam type: {s}")),
        }
    }
}

// 试卷实体
//
// 不变量：同一 (subject_id, exam_type) 分组内，最多一份试卷
// is_selected = true 且状态为 locked。该不变量由选定级联在
// 存储层事务内维护。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/paper.ts")]
pub struct Paper {
    pub id: i64,
    pub subject_id: i64,
    pub exam_type: ExamType,
    pub set_label: String,
    pub status: PaperStatus,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub uploaded_by: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub version: i32,
    pub is_selected: bool,
    pub file_path: Option<String>,
    pub feedback: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_paper_status_round_trip() {
        let all = [
            PaperStatus::Draft,
            PaperStatus::Submitted,
            PaperStatus::PendingReview,
            PaperStatus::Approved,
            PaperStatus::Rejected,
            PaperStatus::Locked,
        ];
        for status in all {
            assert_eq!(PaperStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn test_exam_type_parse() {
        assert_eq!(ExamType::from_str("mid_term").unwrap(), ExamType::MidTerm);
        assert_eq!(ExamType::from_str("practical").unwrap(), ExamType::Practical);
        assert!(ExamType::from_str("final").is_err());
    }
}
