use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    // 身份系统中关联的账号 ID（本服务不校验）
    pub user_id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    // 任教学科
    pub subject_ids: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
