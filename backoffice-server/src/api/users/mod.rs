//! 用户管理 API 模块
//!
//! 除仪表盘外全部仅限管理员。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{require_admin, require_customer, require_vendor};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    let admin = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/adjust-balance", post(handler::adjust_balance))
        .route("/{id}/status", put(handler::update_status))
        .route("/dashboard/admin", get(handler::admin_dashboard))
        .route_layer(middleware::from_fn(require_admin));

    let vendor = Router::new()
        .route("/dashboard/vendor", get(handler::vendor_dashboard))
        .route_layer(middleware::from_fn(require_vendor));

    let customer = Router::new()
        .route("/dashboard/customer", get(handler::customer_dashboard))
        .route_layer(middleware::from_fn(require_customer));

    admin.merge(vendor).merge(customer)
}
