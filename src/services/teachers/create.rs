use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, normalize_email, normalize_optional};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::services::{error_response, shape_error};
use crate::storage::Storage;
use crate::utils::validate::{
    MAX_PERSON_NAME_LEN, validate_email, validate_ids, validate_person_name, validate_phone,
    validate_text,
};
use crate::validators::{ReferenceKind, UniqueKey, validate_references, validate_unique};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    mut teacher_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    teacher_data.full_name = teacher_data.full_name.trim().to_string();
    teacher_data.email = normalize_email(&teacher_data.email);
    teacher_data.phone = normalize_optional(teacher_data.phone);
    teacher_data.specialization = normalize_optional(teacher_data.specialization);

    if let Err(msg) = check_teacher_fields(&teacher_data) {
        return Ok(shape_error(msg));
    }

    if let Err(e) = validate_new_teacher(storage.as_ref(), &teacher_data).await {
        return Ok(error_response("Teacher creation rejected", &e));
    }

    match storage.create_teacher(teacher_data).await {
        Ok(teacher) => {
            info!("Teacher {} ({}) created", teacher.id, teacher.email);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(teacher, "Teacher created successfully")))
        }
        Err(e) => Ok(error_response("Teacher creation failed", &e)),
    }
}

fn check_teacher_fields(teacher: &CreateTeacherRequest) -> std::result::Result<(), String> {
    validate_person_name(&teacher.full_name)?;
    validate_email(&teacher.email)?;
    if let Some(ref phone) = teacher.phone {
        validate_phone(phone)?;
    }
    if let Some(ref specialization) = teacher.specialization {
        validate_text("Specialization", specialization, MAX_PERSON_NAME_LEN)?;
    }
    if let Some(user_id) = teacher.user_id
        && user_id <= 0
    {
        return Err(format!("Invalid user id: {user_id}"));
    }
    validate_ids("subject_ids", &teacher.subject_ids)?;
    Ok(())
}

async fn validate_new_teacher(storage: &dyn Storage, teacher: &CreateTeacherRequest) -> Result<()> {
    validate_unique(storage, &UniqueKey::TeacherEmail(teacher.email.clone()), None).await?;
    validate_references(storage, ReferenceKind::Subject, &teacher.subject_ids).await?;
    Ok(())
}
