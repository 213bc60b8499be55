use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::warn;

use super::SystemService;
use crate::models::{AppStartTime, ApiResponse, ErrorCode, system::responses::HealthResponse};

/// 服务健康检查
///
/// 数据库不可达时返回 503，响应体仍携带完整的状态信息。
pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = service.get_storage(request);

    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or_else(chrono::Utc::now);

    let database_ok = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check: {}", e);
            false
        }
    };

    let response = HealthResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds: chrono::Utc::now()
            .signed_duration_since(started_at)
            .num_seconds(),
        database_ok,
        started_at,
    };

    if database_ok {
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
    } else {
        Ok(
            HttpResponse::ServiceUnavailable().json(ApiResponse::error(
                ErrorCode::InternalServerError,
                response,
                "Database is unreachable",
            )),
        )
    }
}
