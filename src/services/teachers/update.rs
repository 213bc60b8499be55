use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, normalize_email};
use crate::errors::Result;
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, shape_error};
use crate::storage::Storage;
use crate::utils::validate::{
    MAX_PERSON_NAME_LEN, validate_email, validate_ids, validate_person_name, validate_phone,
    validate_text,
};
use crate::validators::{ReferenceKind, UniqueKey, validate_references, validate_unique};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    mut update_data: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to get teacher information", &e)),
    }

    update_data.full_name = update_data.full_name.map(|n| n.trim().to_string());
    update_data.email = update_data.email.as_deref().map(normalize_email);
    // 可选字段提交空串表示清空
    update_data.phone = update_data.phone.map(|v| v.trim().to_string());
    update_data.specialization = update_data.specialization.map(|v| v.trim().to_string());

    if let Err(msg) = check_update_fields(&update_data) {
        return Ok(shape_error(msg));
    }

    if let Err(e) = validate_teacher_update(storage.as_ref(), teacher_id, &update_data).await {
        return Ok(error_response("Teacher update rejected", &e));
    }

    match storage.update_teacher(teacher_id, update_data).await {
        Ok(Some(teacher)) => {
            info!("Teacher {} updated", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(error_response("Teacher update failed", &e)),
    }
}

fn check_update_fields(update: &UpdateTeacherRequest) -> std::result::Result<(), String> {
    if let Some(ref name) = update.full_name {
        validate_person_name(name)?;
    }
    if let Some(ref email) = update.email {
        validate_email(email)?;
    }
    if let Some(ref phone) = update.phone
        && !phone.is_empty()
    {
        validate_phone(phone)?;
    }
    if let Some(ref specialization) = update.specialization
        && !specialization.is_empty()
    {
        validate_text("Specialization", specialization, MAX_PERSON_NAME_LEN)?;
    }
    if let Some(user_id) = update.user_id
        && user_id <= 0
    {
        return Err(format!("Invalid user id: {user_id}"));
    }
    if let Some(ref ids) = update.subject_ids {
        validate_ids("subject_ids", ids)?;
    }
    Ok(())
}

async fn validate_teacher_update(
    storage: &dyn Storage,
    teacher_id: i64,
    update: &UpdateTeacherRequest,
) -> Result<()> {
    if let Some(ref email) = update.email {
        validate_unique(
            storage,
            &UniqueKey::TeacherEmail(email.clone()),
            Some(teacher_id),
        )
        .await?;
    }
    if let Some(ref subject_ids) = update.subject_ids {
        validate_references(storage, ReferenceKind::Subject, subject_ids).await?;
    }
    Ok(())
}
