//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod audit_logs;
mod departments;
mod exams;
mod notifications;
mod papers;
mod stats;
mod subjects;
mod users;

use crate::config::AppConfig;
use crate::errors::{QPSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| QPSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| QPSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| QPSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| QPSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(QPSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
        entities::Notification,
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_user_department(&self, id: i64, department_id: Option<i64>) -> Result<bool> {
        self.update_user_department_impl(id, department_id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 院系模块
    async fn create_department(&self, dept: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(dept).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        self.list_departments_impl().await
    }

    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        self.list_subjects_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 教师科目分配模块
    async fn assign_teacher_to_subject(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<TeacherSubject> {
        self.assign_teacher_to_subject_impl(teacher_id, subject_id)
            .await
    }

    async fn remove_teacher_from_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        self.remove_teacher_from_subject_impl(teacher_id, subject_id)
            .await
    }

    async fn remove_all_subject_assignments(&self, teacher_id: i64) -> Result<u64> {
        self.remove_all_subject_assignments_impl(teacher_id).await
    }

    async fn is_subject_assigned_to_teacher(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<bool> {
        self.is_subject_assigned_to_teacher_impl(teacher_id, subject_id)
            .await
    }

    async fn list_subjects_for_teacher(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_for_teacher_impl(teacher_id).await
    }

    async fn list_assigned_teachers(&self, subject_id: i64) -> Result<Vec<AssignedTeacher>> {
        self.list_assigned_teachers_impl(subject_id).await
    }

    async fn list_teacher_ids_for_subjects(&self, subject_ids: &[i64]) -> Result<Vec<i64>> {
        self.list_teacher_ids_for_subjects_impl(subject_ids).await
    }

    async fn list_teacher_ids_in_department(&self, department_id: i64) -> Result<Vec<i64>> {
        self.list_teacher_ids_in_department_impl(department_id)
            .await
    }

    // 试卷模块
    async fn create_paper(&self, data: CreatePaperData) -> Result<Paper> {
        self.create_paper_impl(data).await
    }

    async fn get_paper_by_id(&self, id: i64) -> Result<Option<Paper>> {
        self.get_paper_by_id_impl(id).await
    }

    async fn list_my_papers(
        &self,
        uploader_id: i64,
        query: MyPapersQuery,
    ) -> Result<PaperListResponse> {
        self.list_my_papers_impl(uploader_id, query).await
    }

    async fn list_department_papers(
        &self,
        department_id: i64,
        query: ReviewListQuery,
    ) -> Result<Vec<Paper>> {
        self.list_department_papers_impl(department_id, query).await
    }

    async fn list_papers_in_group(&self, subject_id: i64, exam_type: &str) -> Result<Vec<Paper>> {
        self.list_papers_in_group_impl(subject_id, exam_type).await
    }

    async fn approve_paper(&self, paper_id: i64, approver_id: i64) -> Result<Option<Paper>> {
        self.approve_paper_impl(paper_id, approver_id).await
    }

    async fn reject_paper(&self, paper_id: i64, feedback: &str) -> Result<Option<Paper>> {
        self.reject_paper_impl(paper_id, feedback).await
    }

    async fn select_paper(
        &self,
        paper_id: i64,
        subject_id: i64,
        exam_type: &str,
    ) -> Result<(Paper, u64)> {
        self.select_paper_impl(paper_id, subject_id, exam_type)
            .await
    }

    async fn list_locked_papers(&self) -> Result<LockedPaperListResponse> {
        self.list_locked_papers_impl().await
    }

    // 通知模块
    async fn create_notifications_batch(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<u64> {
        self.create_notifications_batch_impl(reqs).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(notification_id).await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<bool> {
        self.delete_notification_impl(notification_id).await
    }

    // 审计日志模块
    async fn insert_audit_log(
        &self,
        actor_id: i64,
        action: &str,
        entity_type: &str,
        entity_id: Option<i64>,
        details: Option<serde_json::Value>,
    ) -> Result<()> {
        self.insert_audit_log_impl(actor_id, action, entity_type, entity_id, details)
            .await
    }

    async fn list_recent_audit_logs(&self, limit: u64) -> Result<Vec<AuditLogItem>> {
        self.list_recent_audit_logs_impl(limit).await
    }

    // 统计模块
    async fn count_users_by_role(&self) -> Result<Vec<RoleCount>> {
        self.count_users_by_role_impl().await
    }

    async fn count_papers_by_status(&self) -> Result<Vec<StatusCount>> {
        self.count_papers_by_status_impl().await
    }

    async fn count_departments(&self) -> Result<i64> {
        self.count_departments_impl().await
    }

    async fn count_subjects(&self) -> Result<i64> {
        self.count_subjects_impl().await
    }

    // 考试安排模块
    async fn create_exam(&self, data: CreateExamData) -> Result<Exam> {
        self.create_exam_impl(data).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams(&self, query: ExamListQuery) -> Result<Vec<Exam>> {
        self.list_exams_impl(query).await
    }

    async fn update_exam_status(&self, id: i64, status: &ExamStatus) -> Result<bool> {
        self.update_exam_status_impl(id, status).await
    }
}
