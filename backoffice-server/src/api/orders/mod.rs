//! 订单 API 模块
//!
//! 顾客下单和查询自己的订单；店铺查询分派给自己的订单；
//! 管理员做全量列表、状态流转和导出。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{require_admin, require_customer, require_vendor};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let customer = Router::new()
        .route("/admin/create", post(handler::create))
        .route("/customer", get(handler::customer_orders))
        .route_layer(middleware::from_fn(require_customer));

    let vendor = Router::new()
        .route("/vendor", get(handler::vendor_orders))
        .route_layer(middleware::from_fn(require_vendor));

    let admin = Router::new()
        .route("/admin/all", get(handler::list_admin))
        .route("/{id}/status", put(handler::update_status))
        .route("/admin/export/csv", get(handler::export_csv))
        .route("/admin/export/pdf", get(handler::export_pdf))
        .route_layer(middleware::from_fn(require_admin));

    customer.merge(vendor).merge(admin)
}
