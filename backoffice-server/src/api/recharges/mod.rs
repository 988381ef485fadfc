//! 充值流水 API 模块
//!
//! 任何登录用户可上传凭证；审批和跨用户视图仅限管理员。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{require_admin, require_customer};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/recharges", routes())
}

fn routes() -> Router<ServerState> {
    let authenticated = Router::new().route("/upload", post(handler::upload));

    let customer = Router::new()
        .route("/my", get(handler::my_recharges))
        .route_layer(middleware::from_fn(require_customer));

    let admin = Router::new()
        .route("/approve", post(handler::approve))
        .route("/pending", get(handler::pending))
        .route("/", get(handler::list_all))
        .route_layer(middleware::from_fn(require_admin));

    authenticated.merge(customer).merge(admin)
}
