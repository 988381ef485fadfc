//! 服务器状态

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{FileStore, LogNotifier, Notifier};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | jwt_service | JWT 认证服务 |
/// | files | 上传文件存储 |
/// | notifier | 通知发送接口 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 上传文件存储
    pub files: FileStore,
    /// 通知发送
    pub notifier: Arc<dyn Notifier>,
}

impl ServerState {
    /// 手动构造 (测试用)
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        files: FileStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            files,
            notifier,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/uploads/logs)
    /// 2. 数据库
    /// 3. JWT、文件存储、通知服务
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_service = DbService::new(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        let files = FileStore::new(config.uploads_dir());
        files
            .ensure_layout()
            .expect("Failed to create upload directories");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(
            config.clone(),
            db_service.db,
            jwt_service,
            files,
            Arc::new(LogNotifier),
        )
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
