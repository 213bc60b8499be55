use serde::Deserialize;
use ts_rs::TS;

use super::entities::EnrollmentStatus;
use crate::models::common::PaginationQuery;

// 学生注册到班级
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollStudentRequest {
    pub student_id: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    pub status: Option<EnrollmentStatus>,
}

// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct EnrollmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<EnrollmentStatus>,
}
