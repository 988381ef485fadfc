//! 服务器启动错误

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("绑定端口失败: {0}")]
    Bind(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
