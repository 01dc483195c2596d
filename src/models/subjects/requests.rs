use serde::Deserialize;
use ts_rs::TS;

// 创建科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub department_id: i64,
    pub name: String,
    pub code: String,
    pub semester: i32,
}

// 更新科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub semester: Option<i32>,
}

// 科目列表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListQuery {
    pub department_id: Option<i64>,
    pub semester: Option<i32>,
}

// 教师科目分配请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct AssignTeacherRequest {
    pub teacher_id: i64,
}
