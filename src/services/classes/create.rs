use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::config::{AppConfig, SchoolConfig};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::classes::requests::CreateClassRequest;
use crate::services::{error_response, shape_error};
use crate::storage::Storage;
use crate::utils::validate::{
    dedup_ids, validate_academic_year, validate_capacity_value, validate_class_name,
    validate_ids,
};
use crate::validators::{
    ReferenceKind, UniqueKey, validate_capacity, validate_references, validate_unique,
};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let school = &AppConfig::get().school;

    class_data.name = class_data.name.trim().to_string();

    // 形状校验
    if let Err(msg) = check_class_fields(&class_data, school) {
        return Ok(shape_error(msg));
    }

    // 业务校验
    if let Err(e) = validate_new_class(storage.as_ref(), &class_data).await {
        return Ok(error_response("Class creation rejected", &e));
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!(
                "Class {} ({}) created with {} student(s)",
                class.name, class.academic_year, class.active_enrollments
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(error_response("Class creation failed", &e)),
    }
}

fn check_class_fields(
    class_data: &CreateClassRequest,
    school: &SchoolConfig,
) -> std::result::Result<(), String> {
    validate_class_name(&class_data.name)?;
    validate_academic_year(class_data.academic_year, school)?;
    validate_capacity_value(class_data.capacity, school)?;
    validate_ids("student_ids", &class_data.student_ids)?;
    validate_ids("teacher_ids", &class_data.teacher_ids)?;
    Ok(())
}

async fn validate_new_class(storage: &dyn Storage, class_data: &CreateClassRequest) -> Result<()> {
    validate_unique(
        storage,
        &UniqueKey::ClassNameYear {
            name: class_data.name.clone(),
            academic_year: class_data.academic_year,
        },
        None,
    )
    .await?;

    let students = dedup_ids(&class_data.student_ids);
    validate_capacity(class_data.capacity as i64, students.len() as i64)?;

    validate_references(storage, ReferenceKind::Student, &students).await?;
    validate_references(storage, ReferenceKind::Teacher, &class_data.teacher_ids).await?;
    Ok(())
}
