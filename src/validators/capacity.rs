//! 班级容量校验

use crate::errors::{Result, SISError};

/// 候选人数超过座位容量时拒绝
///
/// 用于创建班级（候选学生名单）、更新班级以及单个学生注册（当前有效注册数 + 1）。
pub fn validate_capacity(capacity: i64, candidate_count: i64) -> Result<()> {
    if candidate_count > capacity {
        return Err(SISError::capacity_exceeded(format!(
            "{candidate_count} students exceed the class capacity of {capacity} seats"
        )));
    }
    Ok(())
}

/// 剩余座位数，不小于 0
pub fn available_seats(capacity: i64, active_enrollments: i64) -> i64 {
    capacity.saturating_sub(active_enrollments).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_capacity_passes() {
        for count in 0..=30 {
            assert!(validate_capacity(30, count).is_ok());
        }
    }

    #[test]
    fn test_over_capacity_fails() {
        for count in 31..40 {
            let err = validate_capacity(30, count).unwrap_err();
            assert!(matches!(err, SISError::CapacityExceeded(_)));
        }
    }

    #[test]
    fn test_thirty_one_students_for_thirty_seats() {
        let err = validate_capacity(30, 31).unwrap_err();
        assert_eq!(err.code(), "E008");
        assert!(err.message().contains("31"));
    }

    #[test]
    fn test_available_seats_saturates() {
        assert_eq!(available_seats(30, 12), 18);
        assert_eq!(available_seats(30, 30), 0);
        assert_eq!(available_seats(20, 25), 0);
    }
}
