//! 数据模型定义
//!
//! 与 `entity` 模块中的数据库实体分离，作为 API 请求/响应与业务层使用的结构。

pub mod classes;
pub mod common;
pub mod enrollments;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    CapacityExceeded = 1010,
    DuplicateKey = 1011,
    MissingReferences = 1012,
    ScheduleConflict = 1013,

    // 班级 2xxx
    ClassNotFound = 2000,

    // 学籍 3xxx
    EnrollmentNotFound = 3000,
    EnrollmentAlreadyActive = 3001,

    // 学生 4xxx
    StudentNotFound = 4000,

    // 教师 5xxx
    TeacherNotFound = 5000,

    // 学科 6xxx
    SubjectNotFound = 6000,

    // 课表 7xxx
    ScheduleNotFound = 7000,
    ScheduleTimeInvalid = 7001,
}
