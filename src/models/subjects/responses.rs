use serde::Serialize;
use ts_rs::TS;

use super::entities::Subject;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Subject>,
}
