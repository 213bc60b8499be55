use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::time::ClockTime;

// 班级所属时段
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub enum Shift {
    Morning,   // 上午班
    Afternoon, // 下午班
    Evening,   // 晚班
}

impl Shift {
    pub const MORNING: &'static str = "morning";
    pub const AFTERNOON: &'static str = "afternoon";
    pub const EVENING: &'static str = "evening";

    /// 根据课节开始时间推断时段：12:00 前为上午，18:00 前为下午，其余为晚上
    pub fn from_start(start: ClockTime) -> Self {
        match start.hour() {
            0..=11 => Shift::Morning,
            12..=17 => Shift::Afternoon,
            _ => Shift::Evening,
        }
    }
}

impl<'de> Deserialize<'de> for Shift {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shift::Morning => write!(f, "{}", Shift::MORNING),
            Shift::Afternoon => write!(f, "{}", Shift::AFTERNOON),
            Shift::Evening => write!(f, "{}", Shift::EVENING),
        }
    }
}

impl std::str::FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Shift::MORNING => Ok(Shift::Morning),
            Shift::AFTERNOON => Ok(Shift::Afternoon),
            Shift::EVENING => Ok(Shift::Evening),
            _ => Err(format!(
                "Invalid shift: '{s}'. Supported: morning, afternoon, evening"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct SchoolClass {
    // 班级ID
    pub id: i64,
    // 班级名称，如 "10A"
    pub name: String,
    // 学年
    pub academic_year: i32,
    // 时段
    pub shift: Shift,
    // 座位容量
    pub capacity: i32,
    // 任课教师
    pub teacher_ids: Vec<i64>,
    // 当前有效注册人数
    pub active_enrollments: i64,
    // 剩余座位
    pub available_seats: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_from_start() {
        assert_eq!(
            Shift::from_start(ClockTime::from_hm(7, 30).unwrap()),
            Shift::Morning
        );
        assert_eq!(
            Shift::from_start(ClockTime::from_hm(12, 0).unwrap()),
            Shift::Afternoon
        );
        assert_eq!(
            Shift::from_start(ClockTime::from_hm(18, 0).unwrap()),
            Shift::Evening
        );
    }

    #[test]
    fn test_shift_round_trip_strings() {
        for shift in [Shift::Morning, Shift::Afternoon, Shift::Evening] {
            assert_eq!(shift.to_string().parse::<Shift>().unwrap(), shift);
        }
        assert!("night".parse::<Shift>().is_err());
    }
}
