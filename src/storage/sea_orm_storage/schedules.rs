//! 教师课表存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{Result, SISError};
use crate::models::schedules::{
    entities::{ScheduleEntry, Weekday},
    requests::ScheduleSlot,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课表条目
    pub async fn create_schedule_impl(
        &self,
        teacher_id: i64,
        slot: ScheduleSlot,
    ) -> Result<ScheduleEntry> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(slot.subject_id),
            weekday: Set(slot.weekday.to_string()),
            start_minute: Set(slot.start_time.minutes()),
            end_minute: Set(slot.end_time.minutes()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建课表条目失败", e))?;

        Ok(result.into_schedule_entry())
    }

    /// 获取教师名下的课表条目
    pub async fn get_schedule_by_id_impl(
        &self,
        teacher_id: i64,
        schedule_id: i64,
    ) -> Result<Option<ScheduleEntry>> {
        let result = Schedules::find_by_id(schedule_id)
            .filter(Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询课表条目失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule_entry()))
    }

    /// 列出教师课表，按星期、开始时间排序
    pub async fn list_teacher_schedules_impl(
        &self,
        teacher_id: i64,
        weekday: Option<Weekday>,
    ) -> Result<Vec<ScheduleEntry>> {
        let mut select = Schedules::find().filter(Column::TeacherId.eq(teacher_id));

        if let Some(weekday) = weekday {
            select = select.filter(Column::Weekday.eq(weekday.to_string()));
        }

        let models = select
            .order_by_asc(Column::StartMinute)
            .all(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询教师课表失败: {e}")))?;

        // 星期以字符串存储，按枚举顺序排序
        let mut entries: Vec<ScheduleEntry> =
            models.into_iter().map(|m| m.into_schedule_entry()).collect();
        entries.sort_by_key(|e| (e.weekday, e.start_time, e.id));

        Ok(entries)
    }

    /// 更新课表条目
    pub async fn update_schedule_impl(
        &self,
        schedule_id: i64,
        slot: ScheduleSlot,
    ) -> Result<Option<ScheduleEntry>> {
        let existing = Schedules::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("查询课表条目失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(schedule_id),
            subject_id: Set(slot.subject_id),
            weekday: Set(slot.weekday.to_string()),
            start_minute: Set(slot.start_time.minutes()),
            end_minute: Set(slot.end_time.minutes()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新课表条目失败", e))?;

        Ok(Some(result.into_schedule_entry()))
    }

    /// 删除课表条目
    pub async fn delete_schedule_impl(&self, teacher_id: i64, schedule_id: i64) -> Result<bool> {
        let result = Schedules::delete_many()
            .filter(Column::Id.eq(schedule_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| SISError::database_operation(format!("删除课表条目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
