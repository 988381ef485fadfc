//! Recharge API Handlers
//!
//! 充值审批是系统里唯一会自动增加余额的路径。

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Recharge, RechargeStatus, RechargeWithUser};
use crate::db::repository::recharge::RechargeListFilter;
use crate::db::repository::{RechargeRepository, UserRepository, parse_record_id};
use crate::services::UploadKind;
use crate::utils::time::parse_date_param;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    #[serde(rename = "rechargeId")]
    pub recharge_id: String,
    pub amount: f64,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

#[derive(Debug, Deserialize)]
pub struct RechargeListQuery {
    pub status: Option<RechargeStatus>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// POST /api/recharges/upload - 上传充值凭证截图
///
/// 只登记一条待审批流水，余额在管理员审批前不变。
pub async fn upload(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<Recharge>>> {
    let mut screenshot: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("screenshot") {
            screenshot = Some(field.bytes().await?.to_vec());
        }
    }

    let Some(bytes) = screenshot else {
        return Err(AppError::validation("Screenshot is required"));
    };

    let path = state.files.save_image(UploadKind::Recharges, &bytes)?;

    let repo = RechargeRepository::new(state.get_db());
    let entry = repo.submit(user.record_id()?, path).await?;

    Ok(ok_with_message(
        entry,
        "Screenshot uploaded. Awaiting admin approval.",
    ))
}

/// POST /api/recharges/approve - 管理员审批充值
///
/// 条件更新保证同一条流水最多被批准一次；输掉竞态的一方收到 409。
pub async fn approve(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Json(req): Json<ApproveRequest>,
) -> AppResult<Json<AppResponse<BalanceResponse>>> {
    if req.amount <= 0.0 {
        return Err(AppError::validation("Amount must be positive"));
    }

    let repo = RechargeRepository::new(state.get_db());
    let entry = repo
        .find_by_id(&req.recharge_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recharge not found"))?;

    let note = req.note.unwrap_or_else(|| "Approved by admin".to_string());
    let approved = repo
        .approve(&req.recharge_id, req.amount, note, admin.record_id()?)
        .await?
        .ok_or_else(|| AppError::conflict("Recharge already approved"))?;

    let users = UserRepository::new(state.get_db());
    let user = users.adjust_balance(&approved.user, req.amount).await?;

    tracing::info!(
        recharge = %req.recharge_id,
        user = %entry.user,
        amount = req.amount,
        "Recharge approved"
    );

    Ok(ok_with_message(
        BalanceResponse {
            balance: user.balance,
        },
        "Recharge approved and balance updated",
    ))
}

/// GET /api/recharges/pending - 待审批队列 (带归属用户)
pub async fn pending(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<RechargeWithUser>>>> {
    let repo = RechargeRepository::new(state.get_db());
    Ok(ok(repo.pending_with_users().await?))
}

/// GET /api/recharges/my - 本人充值流水
pub async fn my_recharges(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Recharge>>>> {
    let repo = RechargeRepository::new(state.get_db());
    Ok(ok(repo.for_user(&user.record_id()?).await?))
}

/// GET /api/recharges - 管理员跨用户视图 (可过滤)
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<RechargeListQuery>,
) -> AppResult<Json<AppResponse<Vec<RechargeWithUser>>>> {
    let user = match &query.user_id {
        Some(raw) => Some(parse_record_id("user", raw)?),
        None => None,
    };
    let from = match &query.from {
        Some(raw) => Some(
            parse_date_param(raw)
                .ok_or_else(|| AppError::validation(format!("Invalid date filter: {}", raw)))?,
        ),
        None => None,
    };
    let to = match &query.to {
        Some(raw) => Some(
            parse_date_param(raw)
                .ok_or_else(|| AppError::validation(format!("Invalid date filter: {}", raw)))?,
        ),
        None => None,
    };

    let repo = RechargeRepository::new(state.get_db());
    let entries = repo
        .list_all(RechargeListFilter {
            status: query.status,
            user,
            from,
            to,
        })
        .await?;

    Ok(ok(entries))
}
