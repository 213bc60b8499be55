use serde::Deserialize;
use ts_rs::TS;

use super::entities::Weekday;
use crate::utils::time::ClockTime;

// 新建课表条目，时间格式 HH:MM
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct CreateScheduleRequest {
    pub subject_id: i64,
    pub weekday: Weekday,
    #[ts(type = "string")]
    pub start_time: ClockTime,
    #[ts(type = "string")]
    pub end_time: ClockTime,
}

// 未提供的字段沿用原值，合并后再做冲突检测
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct UpdateScheduleRequest {
    pub subject_id: Option<i64>,
    pub weekday: Option<Weekday>,
    #[ts(type = "string | null")]
    pub start_time: Option<ClockTime>,
    #[ts(type = "string | null")]
    pub end_time: Option<ClockTime>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleQueryParams {
    pub weekday: Option<Weekday>,
}

// 存储层写入用的完整课节
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub subject_id: i64,
    pub weekday: Weekday,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}
