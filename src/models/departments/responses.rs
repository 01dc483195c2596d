use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Department;

// 院系响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentResponse {
    pub department: Department,
}

// 院系列表响应（院系数量有限，不分页）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentListResponse {
    pub items: Vec<Department>,
}
