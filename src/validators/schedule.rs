//! 教师课表时间冲突校验
//!
//! 课节为半开区间 `[start, end)`；两个课节重叠当且仅当 `s1 < e2 && s2 < e1`，
//! 因此首尾相接（`e1 == s2`）不算冲突。

use tracing::debug;

use super::ValidationLookup;
use crate::errors::{Result, SISError};
use crate::models::schedules::entities::{ScheduleEntry, Weekday};
use crate::utils::time::ClockTime;

/// 输入形状检查：结束时间必须晚于开始时间
pub fn validate_time_range(start: ClockTime, end: ClockTime) -> Result<()> {
    if end <= start {
        return Err(SISError::validation(format!(
            "End time {end} must be later than start time {start}"
        )));
    }
    Ok(())
}

pub fn intervals_overlap(a: (ClockTime, ClockTime), b: (ClockTime, ClockTime)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// 返回第一个与候选区间重叠的条目，`exclude_id` 用于更新时跳过自身
pub fn find_conflict(
    entries: &[ScheduleEntry],
    start: ClockTime,
    end: ClockTime,
    exclude_id: Option<i64>,
) -> Option<&ScheduleEntry> {
    entries
        .iter()
        .filter(|entry| Some(entry.id) != exclude_id)
        .find(|entry| intervals_overlap((entry.start_time, entry.end_time), (start, end)))
}

/// 校验教师在 `weekday` 的候选课节不与已有课节重叠
pub async fn validate_schedule_slot<L>(
    lookup: &L,
    teacher_id: i64,
    weekday: Weekday,
    start: ClockTime,
    end: ClockTime,
    exclude_schedule_id: Option<i64>,
) -> Result<()>
where
    L: ValidationLookup + ?Sized,
{
    validate_time_range(start, end)?;

    let entries = lookup
        .list_teacher_day_schedule(teacher_id, weekday)
        .await?;

    if let Some(existing) = find_conflict(&entries, start, end, exclude_schedule_id) {
        debug!(
            "Schedule conflict for teacher {} on {}: {}-{} overlaps #{}",
            teacher_id, weekday, start, end, existing.id
        );
        return Err(SISError::schedule_conflict(format!(
            "{start}-{end} on {weekday} overlaps schedule entry {} ({}-{})",
            existing.id, existing.start_time, existing.end_time
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::FakeLookup;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_overlap_definition() {
        let cases = [
            (("08:00", "09:30"), ("09:00", "10:00"), true),
            (("08:00", "09:30"), ("09:30", "10:30"), false),
            (("09:30", "10:30"), ("08:00", "09:30"), false),
            (("08:00", "12:00"), ("09:00", "10:00"), true),
            (("09:00", "10:00"), ("08:00", "12:00"), true),
            (("08:00", "09:00"), ("08:00", "09:00"), true),
            (("08:00", "09:00"), ("13:00", "14:00"), false),
        ];
        for ((s1, e1), (s2, e2), expected) in cases {
            assert_eq!(
                intervals_overlap((t(s1), t(e1)), (t(s2), t(e2))),
                expected,
                "[{s1},{e1}) vs [{s2},{e2})"
            );
        }
    }

    #[test]
    fn test_inverted_or_empty_range_rejected() {
        assert!(validate_time_range(t("10:00"), t("09:00")).is_err());
        assert!(validate_time_range(t("10:00"), t("10:00")).is_err());
        assert!(validate_time_range(t("10:00"), t("10:01")).is_ok());
    }

    #[tokio::test]
    async fn test_monday_conflict_and_adjacent_slot() {
        let mut lookup = FakeLookup::default();
        lookup.add_schedule(1, 42, Weekday::Monday, "08:00", "09:30");

        let err = validate_schedule_slot(&lookup, 42, Weekday::Monday, t("09:00"), t("10:00"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SISError::ScheduleConflict(_)));

        assert!(
            validate_schedule_slot(&lookup, 42, Weekday::Monday, t("09:30"), t("10:30"), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_other_day_or_teacher_does_not_conflict() {
        let mut lookup = FakeLookup::default();
        lookup.add_schedule(1, 42, Weekday::Monday, "08:00", "09:30");

        assert!(
            validate_schedule_slot(&lookup, 42, Weekday::Tuesday, t("08:00"), t("09:30"), None)
                .await
                .is_ok()
        );
        assert!(
            validate_schedule_slot(&lookup, 7, Weekday::Monday, t("08:00"), t("09:30"), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_excludes_own_entry() {
        let mut lookup = FakeLookup::default();
        lookup.add_schedule(1, 42, Weekday::Monday, "08:00", "09:30");
        lookup.add_schedule(2, 42, Weekday::Monday, "10:00", "11:00");

        // 延长自身不算冲突
        assert!(
            validate_schedule_slot(&lookup, 42, Weekday::Monday, t("08:00"), t("10:00"), Some(1))
                .await
                .is_ok()
        );
        // 但不能与另一节课重叠
        assert!(
            validate_schedule_slot(&lookup, 42, Weekday::Monday, t("08:00"), t("10:30"), Some(1))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_shape_check_runs_before_lookup() {
        let lookup = FakeLookup::default();
        let err = validate_schedule_slot(&lookup, 1, Weekday::Friday, t("11:00"), t("10:00"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SISError::Validation(_)));
    }
}
