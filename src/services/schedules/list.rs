use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, ensure_teacher};
use crate::models::ApiResponse;
use crate::models::schedules::{
    requests::ScheduleQueryParams, responses::ScheduleListResponse,
};
use crate::services::error_response;

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    teacher_id: i64,
    query: ScheduleQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_teacher(storage.as_ref(), teacher_id).await {
        return Ok(resp);
    }

    match storage.list_teacher_schedules(teacher_id, query.weekday).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScheduleListResponse { teacher_id, items },
            "Schedule retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve schedule", &e)),
    }
}
