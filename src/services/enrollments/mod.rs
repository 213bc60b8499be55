pub mod enroll;
pub mod list;
pub mod withdraw;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{EnrollStudentRequest, EnrollmentQueryParams};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 列出班级注册记录
    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: EnrollmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, request, class_id, query).await
    }

    // 注册学生（占用一个座位）
    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        enroll_data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, request, class_id, enroll_data).await
    }

    // 撤销注册（释放座位）
    pub async fn withdraw_enrollment(
        &self,
        request: &HttpRequest,
        class_id: i64,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        withdraw::withdraw_enrollment(self, request, class_id, enrollment_id).await
    }
}
