//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 业务校验错误（容量、唯一性、引用存在性、课表冲突）与基础设施错误共用同一个枚举，
//! 通过 `ResponseError` 映射为统一的 JSON 响应。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_sis_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SISError {
            $($variant(String),)*
        }

        impl SISError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SISError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SISError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SISError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SISError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SISError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_sis_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Serialization("E004", "Serialization Error"),
    DateParse("E005", "Date Parse Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    CapacityExceeded("E008", "Capacity Exceeded"),
    DuplicateKey("E009", "Duplicate Key"),
    MissingReferences("E010", "Missing References"),
    ScheduleConflict("E011", "Schedule Conflict"),
}

impl SISError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 API 业务错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            SISError::Validation(_) => ErrorCode::BadRequest,
            SISError::NotFound(_) => ErrorCode::NotFound,
            SISError::CapacityExceeded(_) => ErrorCode::CapacityExceeded,
            SISError::DuplicateKey(_) => ErrorCode::DuplicateKey,
            SISError::MissingReferences(_) => ErrorCode::MissingReferences,
            SISError::ScheduleConflict(_) => ErrorCode::ScheduleConflict,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 是否为调用方可修正的业务拒绝（非服务端故障）
    pub fn is_rejection(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// 转换为 HTTP 响应
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.api_code(), self.message()))
    }
}

impl fmt::Display for SISError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SISError {}

impl ResponseError for SISError {
    fn status_code(&self) -> StatusCode {
        match self {
            SISError::Validation(_)
            | SISError::CapacityExceeded(_)
            | SISError::MissingReferences(_) => StatusCode::BAD_REQUEST,
            SISError::NotFound(_) => StatusCode::NOT_FOUND,
            SISError::DuplicateKey(_) | SISError::ScheduleConflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response()
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SISError {
    fn from(err: sea_orm::DbErr) -> Self {
        SISError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SISError {
    fn from(err: serde_json::Error) -> Self {
        SISError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SISError {
    fn from(err: chrono::ParseError) -> Self {
        SISError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SISError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SISError::database_config("test").code(), "E001");
        assert_eq!(SISError::validation("test").code(), "E006");
        assert_eq!(SISError::capacity_exceeded("test").code(), "E008");
        assert_eq!(SISError::schedule_conflict("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SISError::duplicate_key("test").error_type(),
            "Duplicate Key"
        );
        assert_eq!(
            SISError::missing_references("test").error_type(),
            "Missing References"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SISError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SISError::capacity_exceeded("31 students for 30 seats");
        let formatted = err.format_simple();
        assert!(formatted.contains("Capacity Exceeded"));
        assert!(formatted.contains("31 students for 30 seats"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SISError::capacity_exceeded("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SISError::missing_references("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SISError::duplicate_key("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SISError::schedule_conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SISError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SISError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejection_classification() {
        assert!(SISError::duplicate_key("x").is_rejection());
        assert!(!SISError::database_connection("x").is_rejection());
        assert_eq!(
            SISError::schedule_conflict("x").api_code(),
            ErrorCode::ScheduleConflict
        );
    }
}
