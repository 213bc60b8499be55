use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 启动前确认数据库可用
async fn check_storage(storage: &Arc<dyn Storage>) {
    match storage.ping().await {
        Ok(()) => debug!("Storage ping succeeded"),
        Err(e) => warn!("Storage ping failed after startup: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化与迁移
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();
    debug!(
        "Business rules: max_class_capacity={}, academic_year={}..={}",
        config.school.max_class_capacity,
        config.school.min_academic_year,
        config.school.max_academic_year
    );

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    check_storage(&storage).await;

    StartupContext { storage }
}
