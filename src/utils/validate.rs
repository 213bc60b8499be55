//! 请求体形状校验（在业务校验器之前执行）

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SchoolConfig;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9-]{2,16}$").expect("Invalid subject code regex"));

static STUDENT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/-]{3,32}$").expect("Invalid student number regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ]{6,20}$").expect("Invalid phone regex"));

pub const MAX_CLASS_NAME_LEN: usize = 32;
pub const MAX_PERSON_NAME_LEN: usize = 120;
pub const MAX_SUBJECT_NAME_LEN: usize = 80;
pub const MAX_WEEKLY_WORKLOAD: i32 = 40;

/// 去除首尾空白后不能为空且不超过长度上限
pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{field} must be at most {max_len} characters"));
    }
    Ok(())
}

pub fn validate_class_name(name: &str) -> Result<(), String> {
    validate_text("Class name", name, MAX_CLASS_NAME_LEN)
}

pub fn validate_person_name(name: &str) -> Result<(), String> {
    validate_text("Full name", name, MAX_PERSON_NAME_LEN)
}

pub fn validate_academic_year(year: i32, school: &SchoolConfig) -> Result<(), String> {
    if year < school.min_academic_year || year > school.max_academic_year {
        return Err(format!(
            "Academic year must be between {} and {}",
            school.min_academic_year, school.max_academic_year
        ));
    }
    Ok(())
}

/// 座位容量必须为正整数且不超过配置上限
pub fn validate_capacity_value(capacity: i32, school: &SchoolConfig) -> Result<(), String> {
    if capacity <= 0 {
        return Err("Capacity must be a positive integer".to_string());
    }
    if capacity > school.max_class_capacity {
        return Err(format!(
            "Capacity must not exceed {} seats",
            school.max_class_capacity
        ));
    }
    Ok(())
}

/// 学科代码统一为大写
pub fn normalize_subject_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

pub fn validate_subject_code(code: &str) -> Result<(), &'static str> {
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err("Subject code must be 2-16 characters of A-Z, 0-9 or '-'");
    }
    Ok(())
}

pub fn validate_workload_hours(hours: i32) -> Result<(), String> {
    if hours <= 0 || hours > MAX_WEEKLY_WORKLOAD {
        return Err(format!(
            "Weekly workload must be between 1 and {MAX_WEEKLY_WORKLOAD} hours"
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_student_number(number: &str) -> Result<(), &'static str> {
    if !STUDENT_NUMBER_RE.is_match(number) {
        return Err("Student number must be 3-32 characters of letters, digits, '/' or '-'");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 列表类 ID 参数必须为正数
pub fn validate_ids(field: &str, ids: &[i64]) -> Result<(), String> {
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(format!("{field} contains an invalid id: {bad}"));
    }
    Ok(())
}

/// 去重并保持首次出现的顺序
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rules() {
        assert!(validate_class_name("10A").is_ok());
        assert!(validate_class_name("   ").is_err());
        assert!(validate_class_name(&"x".repeat(MAX_CLASS_NAME_LEN + 1)).is_err());
        assert!(validate_person_name("Ana Maria dos Santos").is_ok());
    }

    #[test]
    fn test_academic_year_bounds() {
        let school = SchoolConfig::default();
        assert!(validate_academic_year(2025, &school).is_ok());
        assert!(validate_academic_year(1999, &school).is_err());
        assert!(validate_academic_year(2101, &school).is_err());
    }

    #[test]
    fn test_capacity_value() {
        let school = SchoolConfig::default();
        assert!(validate_capacity_value(30, &school).is_ok());
        assert!(validate_capacity_value(0, &school).is_err());
        assert!(validate_capacity_value(-5, &school).is_err());
        assert!(validate_capacity_value(school.max_class_capacity + 1, &school).is_err());
    }

    #[test]
    fn test_subject_code() {
        assert_eq!(normalize_subject_code(" mat-10 "), "MAT-10");
        assert!(validate_subject_code("MAT-10").is_ok());
        assert!(validate_subject_code("M").is_err());
        assert!(validate_subject_code("mat").is_err());
    }

    #[test]
    fn test_email_and_phone() {
        assert!(validate_email("prof.silva@escola.ao").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_phone("+244 923 456 789").is_ok());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_student_number() {
        assert!(validate_student_number("2025/0001").is_ok());
        assert!(validate_student_number("a").is_err());
    }

    #[test]
    fn test_ids_helpers() {
        assert!(validate_ids("student_ids", &[1, 2]).is_ok());
        assert!(validate_ids("student_ids", &[1, 0]).is_err());
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
