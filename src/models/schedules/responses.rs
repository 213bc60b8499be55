use serde::Serialize;
use ts_rs::TS;

use super::entities::ScheduleEntry;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleListResponse {
    pub teacher_id: i64,
    pub items: Vec<ScheduleEntry>,
}
