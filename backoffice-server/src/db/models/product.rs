//! Product Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::StoreLevel;
use super::serde_helpers;

pub type ProductId = RecordId;

/// Product model
///
/// `adopted_by` 最多绑定一个店铺，且只能从空设置一次 (无取消认领操作)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProductId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub store_levels: Vec<StoreLevel>,
    #[serde(default)]
    pub fee_ratio: f64,
    /// Admin who uploaded the product
    #[serde(with = "serde_helpers::record_id")]
    pub uploaded_by: RecordId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub adopted_by: Option<RecordId>,
    pub created_at: i64,
}

/// Update payload (admin edit; image handled separately by the handler)
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_levels: Option<Vec<StoreLevel>>,
}

/// Adopted product view for the public listing (vendor name joined)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPublic {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProductId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub store_levels: Vec<StoreLevel>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    pub created_at: i64,
}
