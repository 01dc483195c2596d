pub use super::audit_logs::Entity as AuditLogs;
pub use super::departments::Entity as Departments;
pub use super::exams::Entity as Exams;
pub use super::notifications::Entity as Notifications;
pub use super::papers::Entity as Papers;
pub use super::subjects::Entity as Subjects;
pub use super::teacher_subjects::Entity as TeacherSubjects;
pub use super::user_roles::Entity as UserRoles;
pub use super::users::Entity as Users;
