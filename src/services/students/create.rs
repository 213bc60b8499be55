use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::requests::CreateStudentRequest;
use crate::services::{error_response, shape_error};
use crate::utils::validate::{validate_person_name, validate_student_number};
use crate::validators::{UniqueKey, validate_unique};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    student_data.full_name = student_data.full_name.trim().to_string();
    student_data.student_number = student_data.student_number.trim().to_string();

    if let Err(msg) = validate_person_name(&student_data.full_name) {
        return Ok(shape_error(msg));
    }
    if let Err(msg) = validate_student_number(&student_data.student_number) {
        return Ok(shape_error(msg));
    }

    let key = UniqueKey::StudentNumber(student_data.student_number.clone());
    if let Err(e) = validate_unique(storage.as_ref(), &key, None).await {
        return Ok(error_response("Student creation rejected", &e));
    }

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} ({}) created", student.id, student.student_number);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => Ok(error_response("Student creation failed", &e)),
    }
}
