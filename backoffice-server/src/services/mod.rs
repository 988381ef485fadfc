//! 服务模块
//!
//! - [`FileStore`] - 上传文件存储 (商品图/充值截图/收款码)
//! - [`export`] - 订单导出 (CSV / PDF)
//! - [`Notifier`] - 通知发送接口

pub mod export;
pub mod file_store;
pub mod notifier;

pub use file_store::{FileStore, UploadKind};
pub use notifier::{LogNotifier, Notifier};
