//! Notification Sender
//!
//! 通知发送只在接口层面定义；默认实现写结构化日志。
//! 接入真实邮件/短信网关时替换 [`Notifier`] 实现即可。

use async_trait::async_trait;

/// Outbound notification seam
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a message to an address. Failures are the implementation's
    /// problem; callers never block business flow on delivery.
    async fn send(&self, address: &str, subject: &str, body: &str);
}

/// Logging notifier (development / test default)
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, address: &str, subject: &str, body: &str) {
        tracing::info!(
            target: "notify",
            to = %address,
            subject = %subject,
            body_len = body.len(),
            "Notification dispatched"
        );
    }
}
