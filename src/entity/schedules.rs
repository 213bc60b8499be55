//! 教师课表条目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub weekday: String,
    // 距午夜的分钟数，[start_minute, end_minute)
    pub start_minute: i32,
    pub end_minute: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_schedule_entry(self) -> crate::models::schedules::entities::ScheduleEntry {
        use crate::models::classes::entities::Shift;
        use crate::models::schedules::entities::{ScheduleEntry, Weekday};
        use crate::utils::time::ClockTime;
        use chrono::{DateTime, Utc};

        let start_time = ClockTime::from_minutes(self.start_minute).unwrap_or_default();
        let end_time = ClockTime::from_minutes(self.end_minute).unwrap_or_default();

        ScheduleEntry {
            id: self.id,
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            weekday: self.weekday.parse::<Weekday>().unwrap_or(Weekday::Monday),
            start_time,
            end_time,
            shift: Shift::from_start(start_time),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
