//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub academic_year: i32,
    pub shift: String,
    pub capacity: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::class_teachers::Entity")]
    ClassTeachers,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::class_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeachers.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（任课教师和注册人数需由存储层补充）
impl Model {
    pub fn into_class(
        self,
        teacher_ids: Vec<i64>,
        active_enrollments: i64,
    ) -> crate::models::classes::entities::SchoolClass {
        use crate::models::classes::entities::{SchoolClass, Shift};
        use crate::validators::available_seats;
        use chrono::{DateTime, Utc};

        SchoolClass {
            id: self.id,
            name: self.name,
            academic_year: self.academic_year,
            shift: self.shift.parse::<Shift>().unwrap_or(Shift::Morning),
            capacity: self.capacity,
            teacher_ids,
            active_enrollments,
            available_seats: available_seats(self.capacity as i64, active_enrollments),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
