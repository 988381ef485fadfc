//! 商品 API 模块
//!
//! 管理员维护目录；店铺认领商品；`/public` 对外开放。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{require_admin, require_vendor};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    let public = Router::new().route("/public", get(handler::list_public));

    let admin = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_admin));

    let vendor = Router::new()
        .route("/selectable", get(handler::list_selectable))
        .route("/adopt/{id}", put(handler::adopt))
        .route("/mine", get(handler::list_mine))
        .route_layer(middleware::from_fn(require_vendor));

    public.merge(admin).merge(vendor)
}
