//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口 (注册/登录/个人信息)
//! - [`users`] - 用户管理接口 (管理员)
//! - [`products`] - 商品管理接口 (管理员 + 店铺认领)
//! - [`orders`] - 订单接口 (下单/查询/状态流转/导出)
//! - [`recharges`] - 充值流水接口 (上传凭证/审批/查询)
//! - [`payment`] - 线下支付方式配置

pub mod auth;
pub mod health;
pub mod orders;
pub mod payment;
pub mod products;
pub mod recharges;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
