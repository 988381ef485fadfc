//! 认证中间件
//!
//! 为 JWT 认证和角色授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::AppError;

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT，
/// 再到身份存储解析出完整的 [`CurrentUser`]（角色以数据库为准），
/// 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (含 `/uploads` 静态文件)
/// - `/api/auth/login`、`/api/auth/register`
/// - `/api/products/public`、`/api/payment/config`、`/api/health`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404 / 静态文件)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    let is_public_api_route = matches!(
        path,
        "/api/auth/login"
            | "/api/auth/register"
            | "/api/products/public"
            | "/api/payment/config"
            | "/api/health"
    );
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    let claims = match jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            return match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            };
        }
    };

    // 身份存储解析：令牌主体必须仍然存在
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| {
            security_log!("WARN", "auth_user_gone", subject = claims.sub.clone());
            AppError::unauthorized()
        })?;

    req.extensions_mut().insert(CurrentUser::from_user(&user));
    Ok(next.run(req).await)
}

/// 管理员中间件 - 要求 `role == admin`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::forbidden("Admins only"));
    }

    Ok(next.run(req).await)
}

/// 店铺中间件 - 要求 `role == store`
pub async fn require_vendor(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_vendor() {
        security_log!(
            "WARN",
            "vendor_required",
            user_id = user.id.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::forbidden("Vendors only"));
    }

    Ok(next.run(req).await)
}

/// 顾客中间件 - 要求 `role == customer`
pub async fn require_customer(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_customer() {
        security_log!(
            "WARN",
            "customer_required",
            user_id = user.id.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::forbidden("Customers only"));
    }

    Ok(next.run(req).await)
}
