pub mod auth;

pub mod users;

pub mod departments;

pub mod subjects;

pub mod papers;

pub mod roster;

pub mod notifications;

pub mod exams;

pub mod stats;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use departments::configure_department_routes;
pub use exams::configure_exam_routes;
pub use frontend::configure_frontend_routes;
pub use notifications::configure_notification_routes;
pub use papers::configure_paper_routes;
pub use roster::configure_roster_routes;
pub use stats::configure_stats_routes;
pub use subjects::configure_subject_routes;
pub use users::configure_user_routes;
