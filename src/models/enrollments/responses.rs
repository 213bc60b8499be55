use serde::Serialize;
use ts_rs::TS;

use super::entities::Enrollment;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Enrollment>,
}
