pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleQueryParams, ScheduleSlot, UpdateScheduleRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;
use crate::validators::{
    ReferenceKind, validate_references, validate_schedule_slot, validate_time_range,
};

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 教师周课表
    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        query: ScheduleQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, teacher_id, query).await
    }

    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        schedule_data: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, request, teacher_id, schedule_data).await
    }

    pub async fn update_schedule(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        schedule_id: i64,
        update_data: UpdateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, request, teacher_id, schedule_id, update_data).await
    }

    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, request, teacher_id, schedule_id).await
    }
}

/// 课表操作前确认教师存在
pub(crate) async fn ensure_teacher(
    storage: &dyn Storage,
    teacher_id: i64,
) -> std::result::Result<(), HttpResponse> {
    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Err(error_response("Failed to get teacher information", &e)),
    }
}

/// 时间区间不合法时的 400 响应
pub(crate) fn check_time_range(slot: &ScheduleSlot) -> std::result::Result<(), HttpResponse> {
    validate_time_range(slot.start_time, slot.end_time).map_err(|e| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ScheduleTimeInvalid,
            e.message(),
        ))
    })
}

/// 学科必须存在，且与该教师同一天的其他课节不重叠
pub(crate) async fn validate_slot(
    storage: &dyn Storage,
    teacher_id: i64,
    slot: &ScheduleSlot,
    exclude_schedule_id: Option<i64>,
) -> Result<()> {
    validate_references(storage, ReferenceKind::Subject, &[slot.subject_id]).await?;
    validate_schedule_slot(
        storage,
        teacher_id,
        slot.weekday,
        slot.start_time,
        slot.end_time,
        exclude_schedule_id,
    )
    .await
}
