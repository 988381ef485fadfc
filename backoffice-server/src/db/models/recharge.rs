//! Recharge Ledger Model
//!
//! 充值流水是独立表 (按记录 ID 寻址)，不再嵌在用户文档里，
//! 审批用原子条件更新，杜绝按下标寻址的双重审批竞态。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub type RechargeId = RecordId;

/// Ledger entry state: pending -> approved, one-way, no rejection state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RechargeStatus {
    Pending,
    Approved,
}

/// Ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recharge {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RechargeId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub status: RechargeStatus,
    /// 0 while pending; set once on approval
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub screenshot: Option<String>,
    pub created_at: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub approved_by: Option<RecordId>,
    #[serde(default)]
    pub approved_at: Option<i64>,
}

/// Admin view: ledger entry tagged with its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RechargeWithUser {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RechargeId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub status: RechargeStatus,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub screenshot: Option<String>,
    pub created_at: i64,
    #[serde(default)]
    pub approved_at: Option<i64>,
}
