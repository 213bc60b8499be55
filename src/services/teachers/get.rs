use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::teachers::responses::TeacherDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to get teacher information", &e)),
    };

    match storage.list_teacher_schedules(teacher_id, None).await {
        Ok(schedules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherDetailResponse { teacher, schedules },
            "Teacher information retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to get teacher schedule", &e)),
    }
}
