pub mod auth;

pub mod admin;

pub mod teacher;

pub mod student;

pub mod system;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use student::configure_student_routes;
pub use system::configure_system_routes;
pub use teacher::configure_teacher_routes;
