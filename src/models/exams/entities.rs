use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::papers::entities::ExamType;

// 考试状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ExamStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl<'de> Deserialize<'de> for ExamStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ExamStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考试状态: '{s}'. 支持的状态: scheduled, completed, cancelled"
            ))
        })
    }
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamStatus::Scheduled => write!(f, "scheduled"),
            ExamStatus::Completed => write!(f, "completed"),
            ExamStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ExamStatus::Scheduled),
            "completed" => Ok(ExamStatus::Completed),
            "cancelled" => Ok(ExamStatus::Cancelled),
            _ => Err(format!("Invalid exam status: {s}")),
        }
    }
}

// 考试安排：考务中心基于已锁定试卷排考
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub subject_id: i64,
    pub exam_type: ExamType,
    pub paper_id: i64,
    pub title: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub status: ExamStatus,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
