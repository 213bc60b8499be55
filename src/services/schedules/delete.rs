use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduleService, ensure_teacher};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    teacher_id: i64,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_teacher(storage.as_ref(), teacher_id).await {
        return Ok(resp);
    }

    match storage.delete_schedule(teacher_id, schedule_id).await {
        Ok(true) => {
            info!("Schedule entry {} of teacher {} deleted", schedule_id, teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Schedule entry deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule entry not found",
        ))),
        Err(e) => Ok(error_response("Schedule entry deletion failed", &e)),
    }
}
