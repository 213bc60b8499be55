//! 校验器查询接口的数据库实现

use super::SeaOrmStorage;
use crate::entity::prelude::{Classes, Schedules, Students, Subjects, Teachers};
use crate::entity::{classes, schedules, students, subjects, teachers};
use crate::errors::{Result, SISError};
use crate::models::schedules::entities::{ScheduleEntry, Weekday};
use crate::validators::{ReferenceKind, UniqueKey, ValidationLookup};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

#[async_trait::async_trait]
impl ValidationLookup for SeaOrmStorage {
    async fn find_duplicate(
        &self,
        key: &UniqueKey,
        exclude_id: Option<i64>,
    ) -> Result<Option<i64>> {
        let found = match key {
            UniqueKey::ClassNameYear {
                name,
                academic_year,
            } => {
                let mut select = Classes::find()
                    .select_only()
                    .column(classes::Column::Id)
                    .filter(classes::Column::Name.eq(name.as_str()))
                    .filter(classes::Column::AcademicYear.eq(*academic_year));
                if let Some(id) = exclude_id {
                    select = select.filter(classes::Column::Id.ne(id));
                }
                select.into_tuple::<i64>().one(&self.db).await
            }
            UniqueKey::SubjectName(name) => {
                let mut select = Subjects::find()
                    .select_only()
                    .column(subjects::Column::Id)
                    .filter(subjects::Column::Name.eq(name.as_str()));
                if let Some(id) = exclude_id {
                    select = select.filter(subjects::Column::Id.ne(id));
                }
                select.into_tuple::<i64>().one(&self.db).await
            }
            UniqueKey::SubjectCode(code) => {
                let mut select = Subjects::find()
                    .select_only()
                    .column(subjects::Column::Id)
                    .filter(subjects::Column::Code.eq(code.as_str()));
                if let Some(id) = exclude_id {
                    select = select.filter(subjects::Column::Id.ne(id));
                }
                select.into_tuple::<i64>().one(&self.db).await
            }
            UniqueKey::TeacherEmail(email) => {
                let mut select = Teachers::find()
                    .select_only()
                    .column(teachers::Column::Id)
                    .filter(teachers::Column::Email.eq(email.as_str()));
                if let Some(id) = exclude_id {
                    select = select.filter(teachers::Column::Id.ne(id));
                }
                select.into_tuple::<i64>().one(&self.db).await
            }
            UniqueKey::StudentNumber(number) => {
                let mut select = Students::find()
                    .select_only()
                    .column(students::Column::Id)
                    .filter(students::Column::StudentNumber.eq(number.as_str()));
                if let Some(id) = exclude_id {
                    select = select.filter(students::Column::Id.ne(id));
                }
                select.into_tuple::<i64>().one(&self.db).await
            }
        };

        found.map_err(|e| SISError::database_operation(format!("唯一性查询失败: {e}")))
    }

    async fn find_existing_ids(&self, kind: ReferenceKind, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();

        let found = match kind {
            ReferenceKind::Student => {
                Students::find()
                    .select_only()
                    .column(students::Column::Id)
                    .filter(students::Column::Id.is_in(ids))
                    .into_tuple::<i64>()
                    .all(&self.db)
                    .await
            }
            ReferenceKind::Teacher => {
                Teachers::find()
                    .select_only()
                    .column(teachers::Column::Id)
                    .filter(teachers::Column::Id.is_in(ids))
                    .into_tuple::<i64>()
                    .all(&self.db)
                    .await
            }
            ReferenceKind::Subject => {
                Subjects::find()
                    .select_only()
                    .column(subjects::Column::Id)
                    .filter(subjects::Column::Id.is_in(ids))
                    .into_tuple::<i64>()
                    .all(&self.db)
                    .await
            }
            ReferenceKind::Class => {
                Classes::find()
                    .select_only()
                    .column(classes::Column::Id)
                    .filter(classes::Column::Id.is_in(ids))
                    .into_tuple::<i64>()
                    .all(&self.db)
                    .await
            }
        };

        found.map_err(|e| SISError::database_operation(format!("引用存在性查询失败: {e}")))
    }

    async fn list_teacher_day_schedule(
        &self,
        teacher_id: i64,
        weekday: Weekday,
    ) -> Result<Vec<ScheduleEntry>> {
        let models = Schedules::find()
            .filter(schedules::Column::TeacherId.eq(teacher_id))
            .filter(schedules::Column::Weekday.eq(weekday.to_string()))
            .order_by_asc(schedules::Column::StartMinute)
            .all(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询教师课表失败: {e}")))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_schedule_entry())
            .collect())
    }
}
