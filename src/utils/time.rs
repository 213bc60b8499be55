//! 课表时间（精确到分钟的一天内时刻）

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// 一天内的时刻，以距午夜的分钟数存储，序列化为 `HH:MM`
///
/// 取值范围 `00:00..=24:00`，`24:00` 表示当天结束，只能作为课节的结束时间
/// （开始时间必须早于结束时间）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(i32);

impl ClockTime {
    pub fn from_minutes(minutes: i32) -> Option<Self> {
        (0..=MINUTES_PER_DAY).contains(&minutes).then_some(Self(minutes))
    }

    pub fn from_hm(hour: i32, minute: i32) -> Option<Self> {
        if !(0..60).contains(&minute) {
            return None;
        }
        Self::from_minutes(hour * 60 + minute).filter(|_| (0..=24).contains(&hour))
    }

    pub fn minutes(self) -> i32 {
        self.0
    }

    pub fn hour(self) -> i32 {
        self.0 / 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "24:00" {
            return Ok(Self(MINUTES_PER_DAY));
        }
        let time = chrono::NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| format!("Invalid time '{s}', expected HH:MM"))?;
        use chrono::Timelike;
        Self::from_hm(time.hour() as i32, time.minute() as i32)
            .ok_or_else(|| format!("Invalid time '{s}', expected HH:MM"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t: ClockTime = "08:05".parse().unwrap();
        assert_eq!(t.minutes(), 8 * 60 + 5);
        assert_eq!(t.to_string(), "08:05");
        assert_eq!("9:30".parse::<ClockTime>().unwrap().to_string(), "09:30");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("24:01".parse::<ClockTime>().is_err());
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_end_of_day() {
        let end: ClockTime = "24:00".parse().unwrap();
        assert_eq!(end.minutes(), MINUTES_PER_DAY);
        assert_eq!(end.to_string(), "24:00");
        assert!("23:00".parse::<ClockTime>().unwrap() < end);
        assert_eq!(ClockTime::from_hm(24, 0), Some(end));
    }

    #[test]
    fn test_serde_uses_hh_mm() {
        let t = ClockTime::from_hm(13, 45).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"13:45\"");
        let back: ClockTime = serde_json::from_str("\"13:45\"").unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_from_minutes_bounds() {
        assert!(ClockTime::from_minutes(-1).is_none());
        assert!(ClockTime::from_minutes(MINUTES_PER_DAY + 1).is_none());
        assert!(ClockTime::from_hm(24, 30).is_none());
        assert_eq!(ClockTime::from_minutes(0).unwrap().to_string(), "00:00");
    }
}
