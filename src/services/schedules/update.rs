use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduleService, check_time_range, ensure_teacher, validate_slot};
use crate::models::schedules::requests::{ScheduleSlot, UpdateScheduleRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, shape_error};

pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    teacher_id: i64,
    schedule_id: i64,
    update_data: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(subject_id) = update_data.subject_id
        && subject_id <= 0
    {
        return Ok(shape_error(format!("Invalid subject id: {subject_id}")));
    }

    if let Err(resp) = ensure_teacher(storage.as_ref(), teacher_id).await {
        return Ok(resp);
    }

    let existing = match storage.get_schedule_by_id(teacher_id, schedule_id).await {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "Schedule entry not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to get schedule entry", &e)),
    };

    // 未提交的字段沿用当前值
    let slot = ScheduleSlot {
        subject_id: update_data.subject_id.unwrap_or(existing.subject_id),
        weekday: update_data.weekday.unwrap_or(existing.weekday),
        start_time: update_data.start_time.unwrap_or(existing.start_time),
        end_time: update_data.end_time.unwrap_or(existing.end_time),
    };

    if let Err(resp) = check_time_range(&slot) {
        return Ok(resp);
    }

    if let Err(e) = validate_slot(storage.as_ref(), teacher_id, &slot, Some(schedule_id)).await {
        return Ok(error_response("Schedule entry update rejected", &e));
    }

    match storage.update_schedule(schedule_id, slot).await {
        Ok(Some(entry)) => {
            info!(
                "Schedule entry {} of teacher {} moved to {} {}-{}",
                schedule_id, teacher_id, entry.weekday, entry.start_time, entry.end_time
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                entry,
                "Schedule entry updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule entry not found",
        ))),
        Err(e) => Ok(error_response("Schedule entry update failed", &e)),
    }
}
