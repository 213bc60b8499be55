use crate::models::classes::entities::Shift;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_number;
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub academic_year: Option<i32>,
    #[serde(default)]
    pub shift: Option<Shift>,
    pub search: Option<String>,
}

// 创建班级请求
//
// student_ids 中的学生会直接注册到该班级（其在同学年的其他有效注册将被停用），
// 人数不得超过 capacity。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub academic_year: i32,
    pub shift: Shift,
    pub capacity: i32,
    #[serde(default)]
    pub student_ids: Vec<i64>,
    #[serde(default)]
    pub teacher_ids: Vec<i64>,
}

// 更新班级请求
//
// student_ids / teacher_ids 为 None 时保持不变；为 Some 时整体替换。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub academic_year: Option<i32>,
    pub shift: Option<Shift>,
    pub capacity: Option<i32>,
    pub student_ids: Option<Vec<i64>>,
    pub teacher_ids: Option<Vec<i64>>,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub academic_year: Option<i32>,
    pub shift: Option<Shift>,
    pub search: Option<String>,
}
