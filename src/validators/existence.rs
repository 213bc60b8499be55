//! 外键引用存在性校验

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use super::ValidationLookup;
use crate::errors::{Result, SISError};

/// 被引用的实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Student,
    Teacher,
    Subject,
    Class,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Student => "student",
            ReferenceKind::Teacher => "teacher",
            ReferenceKind::Subject => "subject",
            ReferenceKind::Class => "class",
        };
        f.write_str(name)
    }
}

/// 所有 ID 都必须能解析到已有记录
///
/// 先去重，再一次批量查询；错误信息列出缺失的 ID。
pub async fn validate_references<L>(lookup: &L, kind: ReferenceKind, ids: &[i64]) -> Result<()>
where
    L: ValidationLookup + ?Sized,
{
    let mut wanted = ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    if wanted.is_empty() {
        return Ok(());
    }

    let found: HashSet<i64> = lookup
        .find_existing_ids(kind, &wanted)
        .await?
        .into_iter()
        .collect();

    if found.len() == wanted.len() {
        return Ok(());
    }

    let missing: Vec<String> = wanted
        .iter()
        .filter(|id| !found.contains(id))
        .map(|id| id.to_string())
        .collect();
    debug!("Existence check failed for {} ids: {:?}", kind, missing);

    Err(SISError::missing_references(format!(
        "Unknown {kind} id(s): {}",
        missing.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::testing::FakeLookup;

    #[tokio::test]
    async fn test_all_resolved_passes() {
        let lookup = FakeLookup {
            teacher_ids: vec![1, 2, 3],
            ..Default::default()
        };
        assert!(
            validate_references(&lookup, ReferenceKind::Teacher, &[1, 2, 3])
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_one_missing_teacher_rejected() {
        // A、B 存在，C 不存在
        let lookup = FakeLookup {
            teacher_ids: vec![10, 11],
            ..Default::default()
        };
        let err = validate_references(&lookup, ReferenceKind::Teacher, &[10, 11, 12])
            .await
            .unwrap_err();
        assert!(matches!(err, SISError::MissingReferences(_)));
        assert!(err.message().contains("12"));
        assert!(!err.message().contains("10"));
    }

    #[tokio::test]
    async fn test_duplicate_ids_do_not_cause_mismatch() {
        let lookup = FakeLookup {
            student_ids: vec![5],
            ..Default::default()
        };
        assert!(
            validate_references(&lookup, ReferenceKind::Student, &[5, 5, 5])
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_empty_list_passes() {
        let lookup = FakeLookup::default();
        assert!(
            validate_references(&lookup, ReferenceKind::Subject, &[])
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_kinds_are_not_mixed() {
        let lookup = FakeLookup {
            student_ids: vec![1],
            ..Default::default()
        };
        assert!(
            validate_references(&lookup, ReferenceKind::Teacher, &[1])
                .await
                .is_err()
        );
    }
}
