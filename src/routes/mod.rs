pub mod classes;

pub mod enrollments;

pub mod schedules;

pub mod students;

pub mod subjects;

pub mod system;

pub mod teachers;

use actix_web::web;

pub use classes::configure_classes_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teachers_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_classes_routes) // 班级与注册
        .configure(configure_students_routes) // 学生
        .configure(configure_teachers_routes) // 教师与课表
        .configure(configure_subjects_routes) // 学科
        .configure(configure_system_routes); // 系统
}
