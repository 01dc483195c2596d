use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Subject;

// 科目响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectResponse {
    pub subject: Subject,
}

// 科目列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}

// 科目已分配教师
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct AssignedTeacher {
    pub teacher_id: i64,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct AssignedTeacherListResponse {
    pub items: Vec<AssignedTeacher>,
}
