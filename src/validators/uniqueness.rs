//! 唯一性校验

use std::fmt;

use tracing::debug;

use super::ValidationLookup;
use crate::errors::{Result, SISError};

/// 需要全局唯一的业务键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueKey {
    ClassNameYear { name: String, academic_year: i32 },
    SubjectName(String),
    SubjectCode(String),
    TeacherEmail(String),
    StudentNumber(String),
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueKey::ClassNameYear {
                name,
                academic_year,
            } => write!(f, "class '{name}' in academic year {academic_year}"),
            UniqueKey::SubjectName(name) => write!(f, "subject name '{name}'"),
            UniqueKey::SubjectCode(code) => write!(f, "subject code '{code}'"),
            UniqueKey::TeacherEmail(email) => write!(f, "teacher email '{email}'"),
            UniqueKey::StudentNumber(number) => write!(f, "student number '{number}'"),
        }
    }
}

/// 若已有其他记录持有 `key` 则拒绝
///
/// 更新时传入 `exclude_id` 排除正在修改的记录本身。
pub async fn validate_unique<L>(lookup: &L, key: &UniqueKey, exclude_id: Option<i64>) -> Result<()>
where
    L: ValidationLookup + ?Sized,
{
    match lookup.find_duplicate(key, exclude_id).await? {
        Some(existing_id) => {
            debug!("Uniqueness check failed: {} held by #{}", key, existing_id);
            Err(SISError::duplicate_key(format!(
                "{key} already exists (id {existing_id})"
            )))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::FakeLookup;

    fn class_key(name: &str, year: i32) -> UniqueKey {
        UniqueKey::ClassNameYear {
            name: name.to_string(),
            academic_year: year,
        }
    }

    #[tokio::test]
    async fn test_new_pair_passes() {
        let lookup = FakeLookup::default();
        assert!(
            validate_unique(&lookup, &class_key("10A", 2025), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_same_name_and_year_rejected() {
        let lookup = FakeLookup {
            classes: vec![(1, "10A".to_string(), 2025)],
            ..Default::default()
        };
        let err = validate_unique(&lookup, &class_key("10A", 2025), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SISError::DuplicateKey(_)));
        assert!(err.message().contains("10A"));
    }

    #[tokio::test]
    async fn test_same_name_different_year_passes() {
        let lookup = FakeLookup {
            classes: vec![(1, "10A".to_string(), 2025)],
            ..Default::default()
        };
        assert!(
            validate_unique(&lookup, &class_key("10A", 2026), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_excluding_self_allows_update_in_place() {
        let lookup = FakeLookup {
            classes: vec![(7, "10A".to_string(), 2025)],
            ..Default::default()
        };
        assert!(
            validate_unique(&lookup, &class_key("10A", 2025), Some(7))
                .await
                .is_ok()
        );
        assert!(
            validate_unique(&lookup, &class_key("10A", 2025), Some(8))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_subject_code_and_name_are_separate_keys() {
        let lookup = FakeLookup {
            subjects: vec![(3, "Matemática".to_string(), "MAT".to_string())],
            ..Default::default()
        };
        assert!(
            validate_unique(&lookup, &UniqueKey::SubjectCode("MAT".into()), None)
                .await
                .is_err()
        );
        assert!(
            validate_unique(&lookup, &UniqueKey::SubjectName("Física".into()), None)
                .await
                .is_ok()
        );
    }
}
