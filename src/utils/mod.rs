pub mod extractor;
pub mod parameter_error_handler;
pub mod sql;
pub mod time;
pub mod validate;

pub use extractor::{
    SafeClassIdI64, SafeEnrollmentIdI64, SafeScheduleIdI64, SafeStudentIdI64, SafeSubjectIdI64,
    SafeTeacherIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
