use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::errors::Result;
use crate::models::classes::entities::SchoolClass;
use crate::models::enrollments::requests::EnrollStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, shape_error};
use crate::storage::Storage;
use crate::validators::{ReferenceKind, validate_capacity, validate_references};

pub async fn enroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    enroll_data: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = enroll_data.student_id;

    if student_id <= 0 {
        return Ok(shape_error(format!("Invalid student id: {student_id}")));
    }

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to get class information", &e)),
    };

    // 已在本班有效注册
    match storage.get_active_enrollment(class_id, student_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentAlreadyActive,
                format!("Student {student_id} is already enrolled in class {class_id}"),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(error_response("Failed to check enrollment", &e)),
    }

    if let Err(e) = validate_enrollment(storage.as_ref(), &class, student_id).await {
        return Ok(error_response("Enrollment rejected", &e));
    }

    match storage.enroll_student(class_id, student_id).await {
        Ok(enrollment) => {
            info!("Student {} enrolled in class {}", student_id, class_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Student enrolled successfully",
            )))
        }
        Err(e) => Ok(error_response("Enrollment failed", &e)),
    }
}

/// 学生必须存在，且注册后有效人数不超过容量
async fn validate_enrollment(
    storage: &dyn Storage,
    class: &SchoolClass,
    student_id: i64,
) -> Result<()> {
    validate_references(storage, ReferenceKind::Student, &[student_id]).await?;
    validate_capacity(class.capacity as i64, class.active_enrollments + 1)?;
    Ok(())
}
