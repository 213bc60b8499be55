//! 业务规则校验器
//!
//! 四个相互独立、无状态的校验器，由创建/更新处理器在写入前同步调用：
//! - `capacity`: 班级座位容量
//! - `uniqueness`: 唯一键（班级名称+学年、学科名称/代码、教师邮箱、学号）
//! - `existence`: 外键引用批量存在性
//! - `schedule`: 教师同一天课节时间重叠
//!
//! 需要读库的校验通过 [`ValidationLookup`] 显式注入数据访问依赖，
//! 唯一性最终由数据库唯一索引保证，这里只是提前拒绝。

pub mod capacity;
pub mod existence;
pub mod schedule;
pub mod uniqueness;

pub use capacity::{available_seats, validate_capacity};
pub use existence::{ReferenceKind, validate_references};
pub use schedule::{find_conflict, intervals_overlap, validate_schedule_slot, validate_time_range};
pub use uniqueness::{UniqueKey, validate_unique};

use crate::errors::Result;
use crate::models::schedules::entities::{ScheduleEntry, Weekday};

/// 校验器使用的只读数据访问接口
#[async_trait::async_trait]
pub trait ValidationLookup: Send + Sync {
    /// 查找持有该唯一键的记录 ID（排除 `exclude_id`）
    async fn find_duplicate(&self, key: &UniqueKey, exclude_id: Option<i64>)
    -> Result<Option<i64>>;

    /// 一次批量查询，返回 `ids` 中实际存在的 ID
    async fn find_existing_ids(&self, kind: ReferenceKind, ids: &[i64]) -> Result<Vec<i64>>;

    /// 教师在某一天的全部课表条目
    async fn list_teacher_day_schedule(
        &self,
        teacher_id: i64,
        weekday: Weekday,
    ) -> Result<Vec<ScheduleEntry>>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! 内存版查询实现，供各校验器单元测试使用

    use super::*;
    use crate::models::classes::entities::Shift;

    #[derive(Default)]
    pub struct FakeLookup {
        pub classes: Vec<(i64, String, i32)>,
        pub subjects: Vec<(i64, String, String)>,
        pub teacher_emails: Vec<(i64, String)>,
        pub student_numbers: Vec<(i64, String)>,
        pub teacher_ids: Vec<i64>,
        pub student_ids: Vec<i64>,
        pub subject_ids: Vec<i64>,
        pub class_ids: Vec<i64>,
        pub schedules: Vec<ScheduleEntry>,
    }

    impl FakeLookup {
        pub fn add_schedule(
            &mut self,
            id: i64,
            teacher_id: i64,
            weekday: Weekday,
            start: &str,
            end: &str,
        ) {
            let start_time = start.parse().unwrap();
            let now = chrono::Utc::now();
            self.schedules.push(ScheduleEntry {
                id,
                teacher_id,
                subject_id: 1,
                weekday,
                start_time,
                end_time: end.parse().unwrap(),
                shift: Shift::from_start(start_time),
                created_at: now,
                updated_at: now,
            });
        }
    }

    fn not_excluded(id: i64, exclude_id: Option<i64>) -> bool {
        Some(id) != exclude_id
    }

    #[async_trait::async_trait]
    impl ValidationLookup for FakeLookup {
        async fn find_duplicate(
            &self,
            key: &UniqueKey,
            exclude_id: Option<i64>,
        ) -> Result<Option<i64>> {
            let found = match key {
                UniqueKey::ClassNameYear {
                    name,
                    academic_year,
                } => self
                    .classes
                    .iter()
                    .find(|(id, n, y)| {
                        n == name && y == academic_year && not_excluded(*id, exclude_id)
                    })
                    .map(|(id, _, _)| *id),
                UniqueKey::SubjectName(name) => self
                    .subjects
                    .iter()
                    .find(|(id, n, _)| n == name && not_excluded(*id, exclude_id))
                    .map(|(id, _, _)| *id),
                UniqueKey::SubjectCode(code) => self
                    .subjects
                    .iter()
                    .find(|(id, _, c)| c == code && not_excluded(*id, exclude_id))
                    .map(|(id, _, _)| *id),
                UniqueKey::TeacherEmail(email) => self
                    .teacher_emails
                    .iter()
                    .find(|(id, e)| e == email && not_excluded(*id, exclude_id))
                    .map(|(id, _)| *id),
                UniqueKey::StudentNumber(number) => self
                    .student_numbers
                    .iter()
                    .find(|(id, n)| n == number && not_excluded(*id, exclude_id))
                    .map(|(id, _)| *id),
            };
            Ok(found)
        }

        async fn find_existing_ids(&self, kind: ReferenceKind, ids: &[i64]) -> Result<Vec<i64>> {
            let known = match kind {
                ReferenceKind::Student => &self.student_ids,
                ReferenceKind::Teacher => &self.teacher_ids,
                ReferenceKind::Subject => &self.subject_ids,
                ReferenceKind::Class => &self.class_ids,
            };
            Ok(ids.iter().copied().filter(|id| known.contains(id)).collect())
        }

        async fn list_teacher_day_schedule(
            &self,
            teacher_id: i64,
            weekday: Weekday,
        ) -> Result<Vec<ScheduleEntry>> {
            Ok(self
                .schedules
                .iter()
                .filter(|s| s.teacher_id == teacher_id && s.weekday == weekday)
                .cloned()
                .collect())
        }
    }
}
