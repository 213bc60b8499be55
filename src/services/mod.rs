pub mod classes;
pub mod enrollments;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;

pub use classes::ClassService;
pub use enrollments::EnrollmentService;
pub use schedules::ScheduleService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;

use actix_web::HttpResponse;
use tracing::{error, info};

use crate::errors::SISError;

/// 将业务错误转换为 HTTP 响应
///
/// 可由调用方修正的拒绝记为 info，其余记为 error。
pub(crate) fn error_response(context: &str, err: &SISError) -> HttpResponse {
    if err.is_rejection() {
        info!("{}: {}", context, err);
    } else {
        error!("{}: {}", context, err);
    }
    err.to_response()
}

/// 请求体形状错误，统一为 400
pub(crate) fn shape_error(message: impl Into<String>) -> HttpResponse {
    SISError::validation(message).to_response()
}
