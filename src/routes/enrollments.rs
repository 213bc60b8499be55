use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::enrollments::requests::{EnrollStudentRequest, EnrollmentQueryParams};
use crate::services::EnrollmentService;
use crate::utils::{SafeClassIdI64, SafeEnrollmentIdI64};

// 懒加载的全局 ENROLLMENT_SERVICE 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// HTTP处理程序
pub async fn list_enrollments(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<EnrollmentQueryParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(&req, class_id.0, query.into_inner())
        .await
}

pub async fn enroll_student(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll_student(&req, class_id.0, enroll_data.into_inner())
        .await
}

pub async fn withdraw_enrollment(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .withdraw_enrollment(&req, class_id.0, enrollment_id.0)
        .await
}

// 配置路由（挂载在 /api/v1/classes/{class_id}/enrollments 下）
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_enrollments))
            .route(web::post().to(enroll_student)),
    )
    .service(web::resource("/{enrollment_id}").route(web::delete().to(withdraw_enrollment)));
}
