//! Payment Config Model
//!
//! 单例文档：线下支付方式展示信息 (微信 / USDT 收款码)。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Singleton payment display configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub wechat_id: Option<String>,
    #[serde(default)]
    pub wechat_qr: Option<String>,
    #[serde(default)]
    pub usdt_address: Option<String>,
    #[serde(default)]
    pub usdt_qr: Option<String>,
    #[serde(default)]
    pub description1: Option<String>,
    #[serde(default)]
    pub description2: Option<String>,
}

/// Merge payload for updates
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_qr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usdt_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usdt_qr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description2: Option<String>,
}
