use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目实体：归属唯一院系，带学期号
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub department_id: i64,
    pub name: String,
    pub code: String,
    pub semester: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 教师科目分配：决定教师可以为哪些科目上传试卷，
// 以及系主任按科目广播能触达哪些教师
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct TeacherSubject {
    pub id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
}
