//! Authentication Handlers
//!
//! Registration, login and profile lookup.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Role, User, UserResponse, UserStatus};
use crate::db::repository::UserRepository;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// Registration payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Role,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/auth/register - 注册 (未验证状态，等待管理员验证)
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<UserResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let email = req.email.trim().to_lowercase();
    let name = req.name.trim().to_string();

    let repo = UserRepository::new(state.get_db());
    if repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("Email already exists"));
    }

    let password_hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let user = repo
        .create(User {
            id: None,
            name: name.clone(),
            phone: Some(req.phone),
            email: email.clone(),
            password_hash,
            role: req.role,
            status: UserStatus::Active,
            is_verified: false,
            store_level: Default::default(),
            balance: 0.0,
            fee_ratio: 0.0,
            created_at: now_millis(),
        })
        .await?;

    state
        .notifier
        .send(
            &email,
            "Account registered",
            &format!(
                "Hello, {}! Your account has been created and is awaiting verification.",
                name
            ),
        )
        .await;

    Ok(ok_with_message(
        user.into(),
        "Registered. Your account awaits verification.",
    ))
}

/// POST /api/auth/login - 登录
///
/// 统一的 "invalid credentials" 消息，防止手机号枚举。
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let repo = UserRepository::new(state.get_db());

    let user = repo
        .find_by_phone(&req.phone)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(phone = %req.phone, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    if !user.is_verified {
        return Err(AppError::forbidden("Account not verified"));
    }

    if user.status == UserStatus::Inactive {
        return Err(AppError::forbidden("Account is inactive"));
    }

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    Ok(ok(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/profile - 当前用户信息
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<UserResponse>>> {
    let repo = UserRepository::new(state.get_db());
    let record = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(ok(record.into()))
}
