use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::requests::{EnrollmentListQuery, EnrollmentQueryParams},
};
use crate::services::error_response;

pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    query: EnrollmentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to get class information", &e)),
    }

    let list_query = EnrollmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
    };

    match storage
        .list_class_enrollments_with_pagination(class_id, list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Enrollment list retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to retrieve enrollment list", &e)),
    }
}
