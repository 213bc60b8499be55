use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn withdraw_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.withdraw_enrollment(class_id, enrollment_id).await {
        Ok(Some(enrollment)) => {
            info!(
                "Enrollment {} of student {} in class {} withdrawn",
                enrollment.id, enrollment.student_id, class_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment withdrawn successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        ))),
        Err(e) => Ok(error_response("Failed to withdraw enrollment", &e)),
    }
}
