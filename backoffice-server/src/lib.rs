//! Back Office Server - 多角色电商后台
//!
//! # 架构概述
//!
//! - **认证** (`auth`): JWT + Argon2，角色闸口 (admin / store / customer)
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，仓储模式
//! - **HTTP API** (`api`): RESTful API 接口
//! - **订单定价** (`pricing`): Decimal 手续费计算
//! - **服务** (`services`): 上传文件存储、订单导出、通知
//!
//! # 模块结构
//!
//! ```text
//! backoffice-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色检查
//! ├── db/            # 数据库层 (models + repositories)
//! ├── api/           # HTTP 路由和处理器
//! ├── pricing/       # 订单金额计算
//! ├── services/      # 文件存储、导出、通知
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_router};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = %$value),*
        );
    };
}

/// 设置运行环境：加载 .env 并初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____             __      ____  __________
   / __ )____ ______/ /__   / __ \/ __/ __(_)_______
  / __  / __ `/ ___/ //_/  / / / / /_/ /_/ / ___/ _ \
 / /_/ / /_/ / /__/ ,<    / /_/ / __/ __/ / /__/  __/
/_____/\__,_/\___/_/|_|   \____/_/ /_/ /_/\___/\___/
    "#
    );
}
