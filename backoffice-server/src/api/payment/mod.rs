//! 支付方式配置 API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payment", routes())
}

fn routes() -> Router<ServerState> {
    let public = Router::new().route("/config", get(handler::get_config));

    let admin = Router::new()
        .route("/update", post(handler::update_config))
        .route_layer(middleware::from_fn(require_admin));

    public.merge(admin)
}
