//! Order Model
//!
//! 订单创建后价格三元组 (price/fee/total) 即冻结；
//! 状态流转不做合法性校验，但每次流转都追加一条活动日志。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub type OrderId = RecordId;

/// Order lifecycle status
///
/// 订单与活动日志共用这一套状态枚举。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Cancelled,
    Delivered,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub buyer: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub vendor: RecordId,
    pub price: f64,
    pub fee: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// Order enriched with joined display fields
///
/// `product_*` fields are NONE when the product has been deleted;
/// such rows are dropped from admin listings after the join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub product_category: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub vendor_email: Option<String>,
    pub price: f64,
    pub fee: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// Append-only audit record of one status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderActivity {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    pub status: OrderStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub updated_by: Option<RecordId>,
    pub timestamp: i64,
}

/// Paginated admin listing result
#[derive(Debug, Clone, Serialize)]
pub struct OrderListPage {
    /// Total matches before the category join filter
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    /// Rows surviving the join filter on this page (may be < limit)
    pub count: i64,
    pub orders: Vec<OrderDetail>,
}
