use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::config::{AppConfig, SchoolConfig};
use crate::errors::Result;
use crate::models::classes::entities::SchoolClass;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, shape_error};
use crate::storage::Storage;
use crate::utils::validate::{
    dedup_ids, validate_academic_year, validate_capacity_value, validate_class_name,
    validate_ids,
};
use crate::validators::{
    ReferenceKind, UniqueKey, validate_capacity, validate_references, validate_unique,
};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let school = &AppConfig::get().school;

    let existing = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to get class information", &e)),
    };

    if let Some(name) = update_data.name.as_mut() {
        *name = name.trim().to_string();
    }

    if let Err(msg) = check_update_fields(&update_data, school) {
        return Ok(shape_error(msg));
    }

    if let Err(e) = validate_class_update(storage.as_ref(), &existing, &update_data).await {
        return Ok(error_response("Class update rejected", &e));
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => {
            info!("Class {} updated", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Ok(error_response("Class update failed", &e)),
    }
}

fn check_update_fields(
    update: &UpdateClassRequest,
    school: &SchoolConfig,
) -> std::result::Result<(), String> {
    if let Some(ref name) = update.name {
        validate_class_name(name)?;
    }
    if let Some(year) = update.academic_year {
        validate_academic_year(year, school)?;
    }
    if let Some(capacity) = update.capacity {
        validate_capacity_value(capacity, school)?;
    }
    if let Some(ref ids) = update.student_ids {
        validate_ids("student_ids", ids)?;
    }
    if let Some(ref ids) = update.teacher_ids {
        validate_ids("teacher_ids", ids)?;
    }
    Ok(())
}

/// 更新校验：名称或学年变化时检查唯一性（排除自身）；
/// 容量与名单按更新后的值比较，名单未提交时使用当前有效注册人数。
async fn validate_class_update(
    storage: &dyn Storage,
    existing: &SchoolClass,
    update: &UpdateClassRequest,
) -> Result<()> {
    let name = update.name.as_deref().unwrap_or(&existing.name);
    let academic_year = update.academic_year.unwrap_or(existing.academic_year);

    if name != existing.name || academic_year != existing.academic_year {
        validate_unique(
            storage,
            &UniqueKey::ClassNameYear {
                name: name.to_string(),
                academic_year,
            },
            Some(existing.id),
        )
        .await?;
    }

    let capacity = update.capacity.unwrap_or(existing.capacity);
    let roster = update.student_ids.as_deref().map(dedup_ids);
    let candidate_count = roster
        .as_ref()
        .map(|ids| ids.len() as i64)
        .unwrap_or(existing.active_enrollments);
    validate_capacity(capacity as i64, candidate_count)?;

    if let Some(ref students) = roster {
        validate_references(storage, ReferenceKind::Student, students).await?;
    }
    if let Some(ref teachers) = update.teacher_ids {
        validate_references(storage, ReferenceKind::Teacher, teachers).await?;
    }
    Ok(())
}
