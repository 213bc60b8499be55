use serde::Serialize;
use ts_rs::TS;

use super::entities::Teacher;
use crate::models::common::PaginationInfo;
use crate::models::schedules::entities::ScheduleEntry;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Teacher>,
}

// 教师详情：基本信息 + 每周课表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherDetailResponse {
    pub teacher: Teacher,
    pub schedules: Vec<ScheduleEntry>,
}
