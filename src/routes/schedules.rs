use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleQueryParams, UpdateScheduleRequest,
};
use crate::services::ScheduleService;
use crate::utils::{SafeScheduleIdI64, SafeTeacherIdI64};

// 懒加载的全局 SCHEDULE_SERVICE 实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

// HTTP处理程序
pub async fn list_schedules(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
    query: web::Query<ScheduleQueryParams>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .list_schedules(&req, teacher_id.0, query.into_inner())
        .await
}

pub async fn create_schedule(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
    schedule_data: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .create_schedule(&req, teacher_id.0, schedule_data.into_inner())
        .await
}

pub async fn update_schedule(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
    schedule_id: SafeScheduleIdI64,
    update_data: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedule(&req, teacher_id.0, schedule_id.0, update_data.into_inner())
        .await
}

pub async fn delete_schedule(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
    schedule_id: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .delete_schedule(&req, teacher_id.0, schedule_id.0)
        .await
}

// 配置路由（挂载在 /api/v1/teachers/{teacher_id}/schedules 下）
pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_schedules))
            .route(web::post().to(create_schedule)),
    )
    .service(
        web::resource("/{schedule_id}")
            .route(web::put().to(update_schedule))
            .route(web::delete().to(delete_schedule)),
    );
}
