//! User Management Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Role, User, UserCreate, UserResponse, UserStatus, UserUpdate};
use crate::db::repository::{OrderRepository, RechargeRepository, UserRepository};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: UserStatus,
}

#[derive(Debug, Deserialize)]
pub struct AdjustBalanceRequest {
    pub amount: f64,
    pub note: Option<String>,
}

/// GET /api/users - 用户列表 (可按角色过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<AppResponse<Vec<UserResponse>>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all(query.role).await?;
    Ok(ok(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/:id - 单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<UserResponse>>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(user.into()))
}

/// POST /api/users - 管理员创建用户 (预先验证)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<UserCreate>,
) -> AppResult<Json<AppResponse<UserResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // 管理员只能创建店铺和顾客账号
    if req.role == Role::Admin {
        return Err(AppError::validation("Invalid role for creation"));
    }

    let email = req.email.trim().to_lowercase();

    let repo = UserRepository::new(state.get_db());
    if repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("Email already exists"));
    }

    let password_hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let user = repo
        .create(User {
            id: None,
            name: req.name.trim().to_string(),
            phone: Some(req.phone),
            email,
            password_hash,
            role: req.role,
            status: UserStatus::Active,
            is_verified: true,
            store_level: req.store_level.unwrap_or_default(),
            balance: 0.0,
            fee_ratio: req.fee_ratio.unwrap_or(0.0),
            created_at: now_millis(),
        })
        .await?;

    Ok(ok_with_message(user.into(), "User created"))
}

/// PUT /api/users/:id - 管理员更新用户
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> AppResult<Json<AppResponse<UserResponse>>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.update(&id, req).await?;
    Ok(ok_with_message(user.into(), "User updated"))
}

/// PUT /api/users/:id/status - 启用/停用账号
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<AppResponse<UserResponse>>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.update_status(&id, req.status).await?;
    Ok(ok_with_message(user.into(), "User status updated"))
}

/// DELETE /api/users/:id - 删除用户
///
/// 级联删除其充值流水以及引用的所有截图文件。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record has no id"))?;

    // Cascade: ledger rows + their screenshot files
    let recharges = RechargeRepository::new(state.get_db());
    for entry in recharges.delete_for_user(&user_id).await? {
        if let Some(screenshot) = &entry.screenshot {
            state.files.delete(screenshot);
        }
    }

    repo.delete(&id).await?;
    Ok(ok_with_message((), "User deleted successfully"))
}

/// POST /api/users/:id/adjust-balance - 管理员手动调整余额
///
/// 正负皆可；同时在流水里追加一条由管理员署名的已批准记录。
/// 余额无下限，可以为负。
pub async fn adjust_balance(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<AdjustBalanceRequest>,
) -> AppResult<Json<AppResponse<UserResponse>>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let user_id = user
        .id
        .ok_or_else(|| AppError::internal("User record has no id"))?;

    let updated = repo.adjust_balance(&user_id, req.amount).await?;

    let recharges = RechargeRepository::new(state.get_db());
    recharges
        .append_adjustment(user_id, req.amount, req.note, admin.record_id()?)
        .await?;

    Ok(ok_with_message(updated.into(), "Balance adjusted"))
}

// =============================================================================
// Dashboards
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub total_users: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub recent_orders: Vec<crate::db::models::OrderDetail>,
}

#[derive(Debug, Serialize)]
pub struct VendorDashboard {
    pub assigned_orders: i64,
}

#[derive(Debug, Serialize)]
pub struct CustomerDashboard {
    pub current_balance: f64,
    pub my_orders: i64,
}

/// GET /api/users/dashboard/admin - 管理员仪表盘
pub async fn admin_dashboard(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<AdminDashboard>>> {
    let users = UserRepository::new(state.get_db());
    let orders = OrderRepository::new(state.get_db());

    let (total_users, total_orders, total_revenue, recent_orders) = futures::try_join!(
        users.count_managed(),
        orders.count_all(),
        orders.delivered_revenue(),
        orders.recent(5),
    )?;

    Ok(ok(AdminDashboard {
        total_users,
        total_orders,
        total_revenue,
        recent_orders,
    }))
}

/// GET /api/users/dashboard/vendor - 店铺仪表盘
pub async fn vendor_dashboard(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<VendorDashboard>>> {
    let orders = OrderRepository::new(state.get_db());
    let assigned_orders = orders.count_by_vendor(&user.record_id()?).await?;
    Ok(ok(VendorDashboard { assigned_orders }))
}

/// GET /api/users/dashboard/customer - 顾客仪表盘
pub async fn customer_dashboard(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<CustomerDashboard>>> {
    let users = UserRepository::new(state.get_db());
    let orders = OrderRepository::new(state.get_db());

    let record = users
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let my_orders = orders.count_by_buyer(&user.record_id()?).await?;

    Ok(ok(CustomerDashboard {
        current_balance: record.balance,
        my_orders,
    }))
}
