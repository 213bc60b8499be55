use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MAX_CATEGORY_LEN, SubjectService, validate_credits};
use crate::errors::Result;
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, shape_error};
use crate::storage::Storage;
use crate::utils::validate::{
    MAX_SUBJECT_NAME_LEN, normalize_subject_code, validate_ids, validate_subject_code,
    validate_text, validate_workload_hours,
};
use crate::validators::{ReferenceKind, UniqueKey, validate_references, validate_unique};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    mut update_data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to get subject information", &e)),
    }

    update_data.name = update_data.name.map(|n| n.trim().to_string());
    update_data.code = update_data.code.as_deref().map(normalize_subject_code);
    update_data.category = update_data.category.map(|c| c.trim().to_string());

    if let Err(msg) = check_update_fields(&update_data) {
        return Ok(shape_error(msg));
    }

    if let Err(e) = validate_subject_update(storage.as_ref(), subject_id, &update_data).await {
        return Ok(error_response("Subject update rejected", &e));
    }

    match storage.update_subject(subject_id, update_data).await {
        Ok(Some(subject)) => {
            info!("Subject {} updated", subject_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => Ok(error_response("Subject update failed", &e)),
    }
}

fn check_update_fields(update: &UpdateSubjectRequest) -> std::result::Result<(), String> {
    if let Some(ref name) = update.name {
        validate_text("Subject name", name, MAX_SUBJECT_NAME_LEN)?;
    }
    if let Some(ref code) = update.code {
        validate_subject_code(code)?;
    }
    if let Some(ref category) = update.category {
        validate_text("Category", category, MAX_CATEGORY_LEN)?;
    }
    if let Some(hours) = update.workload_hours {
        validate_workload_hours(hours)?;
    }
    validate_credits(update.credits)?;
    if let Some(ref ids) = update.teacher_ids {
        validate_ids("teacher_ids", ids)?;
    }
    Ok(())
}

async fn validate_subject_update(
    storage: &dyn Storage,
    subject_id: i64,
    update: &UpdateSubjectRequest,
) -> Result<()> {
    if let Some(ref name) = update.name {
        validate_unique(
            storage,
            &UniqueKey::SubjectName(name.clone()),
            Some(subject_id),
        )
        .await?;
    }
    if let Some(ref code) = update.code {
        validate_unique(
            storage,
            &UniqueKey::SubjectCode(code.clone()),
            Some(subject_id),
        )
        .await?;
    }
    if let Some(ref teacher_ids) = update.teacher_ids {
        validate_references(storage, ReferenceKind::Teacher, teacher_ids).await?;
    }
    Ok(())
}
