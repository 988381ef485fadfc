//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderDetail, OrderListPage, OrderStatus};
use crate::db::repository::order::OrderListFilter;
use crate::db::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::pricing;
use crate::services::export;
use crate::utils::time::{now_millis, parse_date_param};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct OrderCreateRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub category: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /api/orders/admin/create - 顾客下单
///
/// 只对已被店铺认领的商品下单；费用按下单时的买家费率冻结。
/// 不扣余额：余额由管理员在线下核对后手动结算。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<OrderCreateRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    if req.product_id.trim().is_empty() {
        return Err(AppError::validation("Product ID is required"));
    }

    let users = UserRepository::new(state.get_db());
    let products = ProductRepository::new(state.get_db());

    let buyer = users.find_by_id(&user.id).await?;
    let product = products.find_by_id(&req.product_id).await?;

    let (Some(buyer), Some(product)) = (buyer, product) else {
        return Err(AppError::not_found("Invalid buyer or product"));
    };

    let Some(vendor_id) = product.adopted_by.clone() else {
        return Err(AppError::forbidden(
            "Product has not been assigned to any vendor/store",
        ));
    };

    let vendor = users
        .find_by_id(&vendor_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found("Vendor not found for this product"))?;

    let quote = pricing::quote(product.price, buyer.fee_ratio);
    tracing::info!(
        buyer_balance = buyer.balance,
        total_cost = quote.total,
        "Order placed without balance deduction"
    );

    let orders = OrderRepository::new(state.get_db());
    let order = orders
        .create(Order {
            id: None,
            product: product
                .id
                .ok_or_else(|| AppError::internal("Product record has no id"))?,
            buyer: buyer
                .id
                .ok_or_else(|| AppError::internal("Buyer record has no id"))?,
            vendor: vendor
                .id
                .ok_or_else(|| AppError::internal("Vendor record has no id"))?,
            price: quote.price,
            fee: quote.fee,
            total: quote.total,
            status: OrderStatus::Placed,
            created_at: now_millis(),
        })
        .await?;

    Ok(ok_with_message(
        order,
        "Order placed successfully. Admin will confirm after balance update.",
    ))
}

/// GET /api/orders/vendor - 店铺查看分派给自己的订单
pub async fn vendor_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<OrderDetail>>>> {
    let repo = OrderRepository::new(state.get_db());
    Ok(ok(repo.find_detail_by_vendor(&user.record_id()?).await?))
}

/// GET /api/orders/customer - 顾客查看自己的订单
pub async fn customer_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<OrderDetail>>>> {
    let repo = OrderRepository::new(state.get_db());
    Ok(ok(repo.find_detail_by_buyer(&user.record_id()?).await?))
}

/// PUT /api/orders/:id/status - 管理员流转订单状态
///
/// 状态流转不做合法性校验；每次流转追加一条活动日志。
/// 两次写入之间没有事务：日志写入失败时状态已经生效。
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo.update_status(&id, req.status).await?;

    let order_id = order
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Order record has no id"))?;
    repo.append_activity(order_id, req.status, req.note, Some(user.record_id()?))
        .await?;

    Ok(ok_with_message(order, "Order status updated"))
}

/// GET /api/orders/admin/all - 管理员分页列表
///
/// status/日期过滤进查询；分类过滤发生在取页之后的连接阶段，
/// 所以 `count` 可能小于 `limit` (total/pages 不受分类过滤影响)。
pub async fn list_admin(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<AppResponse<OrderListPage>>> {
    let from = match &query.from {
        Some(raw) => Some(
            parse_date_param(raw)
                .ok_or_else(|| AppError::validation(format!("Invalid date filter: {}", raw)))?,
        ),
        None => None,
    };
    let to = match &query.to {
        Some(raw) => Some(
            parse_date_param(raw)
                .ok_or_else(|| AppError::validation(format!("Invalid date filter: {}", raw)))?,
        ),
        None => None,
    };

    let repo = OrderRepository::new(state.get_db());
    let page = repo
        .list_admin(OrderListFilter {
            status: query.status,
            category: query.category,
            from,
            to,
            page: query.page.unwrap_or(1),
            limit: query.limit.unwrap_or(10),
        })
        .await?;

    Ok(ok(page))
}

/// GET /api/orders/admin/export/csv - 导出全量订单表格
pub async fn export_csv(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all_detailed().await?;
    let csv = export::orders_to_csv(&orders);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=orders.csv",
            ),
        ],
        csv,
    ))
}

/// GET /api/orders/admin/export/pdf - 导出订单报告
pub async fn export_pdf(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all_detailed().await?;
    let pdf = export::orders_to_pdf(&orders);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=orders.pdf",
            ),
        ],
        pdf,
    ))
}
