use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MAX_CATEGORY_LEN, SubjectService, validate_credits};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::services::{error_response, shape_error};
use crate::storage::Storage;
use crate::utils::validate::{
    MAX_SUBJECT_NAME_LEN, normalize_subject_code, validate_ids, validate_subject_code,
    validate_text, validate_workload_hours,
};
use crate::validators::{ReferenceKind, UniqueKey, validate_references, validate_unique};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    subject_data.name = subject_data.name.trim().to_string();
    subject_data.code = normalize_subject_code(&subject_data.code);
    subject_data.category = subject_data.category.trim().to_string();

    if let Err(msg) = check_subject_fields(&subject_data) {
        return Ok(shape_error(msg));
    }

    if let Err(e) = validate_new_subject(storage.as_ref(), &subject_data).await {
        return Ok(error_response("Subject creation rejected", &e));
    }

    match storage.create_subject(subject_data).await {
        Ok(subject) => {
            info!("Subject {} ({}) created", subject.code, subject.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(error_response("Subject creation failed", &e)),
    }
}

fn check_subject_fields(subject: &CreateSubjectRequest) -> std::result::Result<(), String> {
    validate_text("Subject name", &subject.name, MAX_SUBJECT_NAME_LEN)?;
    validate_subject_code(&subject.code)?;
    validate_text("Category", &subject.category, MAX_CATEGORY_LEN)?;
    validate_workload_hours(subject.workload_hours)?;
    validate_credits(subject.credits)?;
    validate_ids("teacher_ids", &subject.teacher_ids)?;
    Ok(())
}

async fn validate_new_subject(storage: &dyn Storage, subject: &CreateSubjectRequest) -> Result<()> {
    validate_unique(storage, &UniqueKey::SubjectName(subject.name.clone()), None).await?;
    validate_unique(storage, &UniqueKey::SubjectCode(subject.code.clone()), None).await?;
    validate_references(storage, ReferenceKind::Teacher, &subject.teacher_ids).await?;
    Ok(())
}
