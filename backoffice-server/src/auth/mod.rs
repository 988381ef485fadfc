//! 认证授权模块
//!
//! 提供 JWT 认证和角色检查中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文 (角色、验证状态、账户状态)
//! - [`require_auth`] - 认证中间件 (访问闸口)
//! - [`require_admin`] / [`require_vendor`] / [`require_customer`] - 角色检查

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_customer, require_vendor};
