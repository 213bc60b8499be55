use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduleService, check_time_range, ensure_teacher, validate_slot};
use crate::models::ApiResponse;
use crate::models::schedules::requests::{CreateScheduleRequest, ScheduleSlot};
use crate::services::{error_response, shape_error};

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    teacher_id: i64,
    schedule_data: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if schedule_data.subject_id <= 0 {
        return Ok(shape_error(format!(
            "Invalid subject id: {}",
            schedule_data.subject_id
        )));
    }

    let slot = ScheduleSlot {
        subject_id: schedule_data.subject_id,
        weekday: schedule_data.weekday,
        start_time: schedule_data.start_time,
        end_time: schedule_data.end_time,
    };

    if let Err(resp) = check_time_range(&slot) {
        return Ok(resp);
    }

    if let Err(resp) = ensure_teacher(storage.as_ref(), teacher_id).await {
        return Ok(resp);
    }

    if let Err(e) = validate_slot(storage.as_ref(), teacher_id, &slot, None).await {
        return Ok(error_response("Schedule entry rejected", &e));
    }

    match storage.create_schedule(teacher_id, slot).await {
        Ok(entry) => {
            info!(
                "Schedule entry {} created for teacher {}: {} {}-{}",
                entry.id, teacher_id, entry.weekday, entry.start_time, entry.end_time
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                entry,
                "Schedule entry created successfully",
            )))
        }
        Err(e) => Ok(error_response("Schedule entry creation failed", &e)),
    }
}
