use std::sync::Arc;

use crate::models::{
    audit::responses::AuditLogItem,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, UpdateDepartmentRequest},
    },
    exams::{
        entities::{Exam, ExamStatus},
        requests::{CreateExamData, ExamListQuery},
    },
    notifications::{
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    papers::{
        entities::Paper,
        requests::{CreatePaperData, MyPapersQuery, ReviewListQuery},
        responses::{LockedPaperListResponse, PaperListResponse},
    },
    stats::responses::{RoleCount, StatusCount},
    subjects::{
        entities::{Subject, TeacherSubject},
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::AssignedTeacher,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（同时写入 user_roles 角色行）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息（含角色）
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息（含角色重新指派）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 更新用户所属院系（系主任增删教师用）
    async fn update_user_department(&self, id: i64, department_id: Option<i64>) -> Result<bool>;
    // 用户总数（启动时判断是否需要初始化管理员）
    async fn count_users(&self) -> Result<u64>;

    /// 院系管理方法
    async fn create_department(&self, dept: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn list_departments(&self) -> Result<Vec<Department>>;
    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    // 删除院系；存在关联用户或科目时返回 ReferentialIntegrity 错误
    async fn delete_department(&self, id: i64) -> Result<bool>;

    /// 科目管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 教师科目分配方法
    // 分配教师到科目
    async fn assign_teacher_to_subject(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<TeacherSubject>;
    // 取消教师科目分配
    async fn remove_teacher_from_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool>;
    // 删除教师的全部科目分配（移出院系时）
    async fn remove_all_subject_assignments(&self, teacher_id: i64) -> Result<u64>;
    // 上传守卫：科目是否分配给该教师
    async fn is_subject_assigned_to_teacher(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<bool>;
    // 教师的科目列表
    async fn list_subjects_for_teacher(&self, teacher_id: i64) -> Result<Vec<Subject>>;
    // 科目的已分配教师列表
    async fn list_assigned_teachers(&self, subject_id: i64) -> Result<Vec<AssignedTeacher>>;
    // 按科目集合解析任课教师（去重，广播扇出用）
    async fn list_teacher_ids_for_subjects(&self, subject_ids: &[i64]) -> Result<Vec<i64>>;
    // 院系内全部教师角色用户（按院系广播用）
    async fn list_teacher_ids_in_department(&self, department_id: i64) -> Result<Vec<i64>>;

    /// 试卷方法
    // 创建试卷（版本号 = 同 (科目, 考试类型, 上传者) 的历史最大版本 + 1）
    async fn create_paper(&self, data: CreatePaperData) -> Result<Paper>;
    async fn get_paper_by_id(&self, id: i64) -> Result<Option<Paper>>;
    // 教师自己的投稿（默认排除 rejected）
    async fn list_my_papers(
        &self,
        uploader_id: i64,
        query: MyPapersQuery,
    ) -> Result<PaperListResponse>;
    // 系主任所辖院系的试卷（匿名化投影在服务层完成）
    async fn list_department_papers(
        &self,
        department_id: i64,
        query: ReviewListQuery,
    ) -> Result<Vec<Paper>>;
    // 同 (科目, 考试类型) 分组内全部试卷
    async fn list_papers_in_group(
        &self,
        subject_id: i64,
        exam_type: &str,
    ) -> Result<Vec<Paper>>;
    // 审批：pending_review → approved（条件更新，状态不符返回 None）
    async fn approve_paper(&self, paper_id: i64, approver_id: i64) -> Result<Option<Paper>>;
    // 驳回：pending_review → rejected，附驳回意见
    async fn reject_paper(&self, paper_id: i64, feedback: &str) -> Result<Option<Paper>>;
    // 选定：三步级联在单个事务内执行，返回锁定后的试卷与被级联驳回的数量
    async fn select_paper(
        &self,
        paper_id: i64,
        subject_id: i64,
        exam_type: &str,
    ) -> Result<(Paper, u64)>;
    // 考务中心视角：全部已锁定且被选定的试卷
    async fn list_locked_papers(&self) -> Result<LockedPaperListResponse>;

    /// 通知方法
    // 批量写入通知（每接收者一行）
    async fn create_notifications_batch(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<u64>;
    async fn get_notification_by_id(
        &self,
        id: i64,
    ) -> Result<Option<crate::models::notifications::entities::Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, notification_id: i64) -> Result<bool>;

    /// 审计日志方法（只追加）
    async fn insert_audit_log(
        &self,
        actor_id: i64,
        action: &str,
        entity_type: &str,
        entity_id: Option<i64>,
        details: Option<serde_json::Value>,
    ) -> Result<()>;
    // 最近 N 条审计日志，附操作者姓名
    async fn list_recent_audit_logs(&self, limit: u64) -> Result<Vec<AuditLogItem>>;

    /// 统计方法（管理员总览，空库返回全零）
    async fn count_users_by_role(&self) -> Result<Vec<RoleCount>>;
    async fn count_papers_by_status(&self) -> Result<Vec<StatusCount>>;
    async fn count_departments(&self) -> Result<i64>;
    async fn count_subjects(&self) -> Result<i64>;

    /// 考试安排方法
    async fn create_exam(&self, data: CreateExamData) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams(&self, query: ExamListQuery) -> Result<Vec<Exam>>;
    async fn update_exam_status(&self, id: i64, status: &ExamStatus) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
