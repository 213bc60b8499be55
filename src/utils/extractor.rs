//! 路径参数安全提取器
//!
//! 从路由中读取指定名称的 ID 参数，要求为正整数，否则直接返回 400。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Option<i64> {
    req.match_info()
        .get(param)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
}

fn invalid_param_error(param: &str) -> actix_web::Error {
    let message = format!("Invalid path parameter: {param}");
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(
                        parse_positive_id(req, $param)
                            .map($name)
                            .ok_or_else(|| invalid_param_error($param)),
                    )
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeClassIdI64 => "class_id",
    SafeEnrollmentIdI64 => "enrollment_id",
    SafeStudentIdI64 => "student_id",
    SafeTeacherIdI64 => "teacher_id",
    SafeSubjectIdI64 => "subject_id",
    SafeScheduleIdI64 => "schedule_id",
}
