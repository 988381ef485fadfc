//! Order Repository
//!
//! Orders plus their append-only activity log. Status transitions are
//! unconditional; the log records history but does not gate anything.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderActivity, OrderDetail, OrderListPage, OrderStatus};
use crate::utils::time::now_millis;

/// Joined projection shared by every detail query
const DETAIL_SELECT: &str = "SELECT *, product.title AS product_title, \
    product.category AS product_category, \
    buyer.name AS buyer_name, buyer.email AS buyer_email, \
    vendor.name AS vendor_name, vendor.email AS vendor_email FROM order";

/// Admin listing filter
#[derive(Debug, Clone, Default)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    pub category: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub page: i64,
    pub limit: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    total: i64,
}

#[derive(Debug, serde::Deserialize)]
struct SumRow {
    total: f64,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create("order").content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_record_id("order", id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    pub async fn find_detail_by_vendor(&self, vendor: &RecordId) -> RepoResult<Vec<OrderDetail>> {
        let sql = format!("{} WHERE vendor = $vendor ORDER BY created_at DESC", DETAIL_SELECT);
        let mut result = self
            .base
            .db()
            .query(sql)
            .bind(("vendor", vendor.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn find_detail_by_buyer(&self, buyer: &RecordId) -> RepoResult<Vec<OrderDetail>> {
        let sql = format!("{} WHERE buyer = $buyer ORDER BY created_at DESC", DETAIL_SELECT);
        let mut result = self
            .base
            .db()
            .query(sql)
            .bind(("buyer", buyer.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    /// Set the order status unconditionally and return the updated order.
    ///
    /// Any status may follow any other; callers append the activity row.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let record_id = parse_record_id("order", id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET status = $status RETURN AFTER")
            .bind(("id", record_id))
            .bind(("status", status))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Append one activity-log row for a status transition. Write-only;
    /// rows are never updated or deleted.
    pub async fn append_activity(
        &self,
        order: RecordId,
        status: OrderStatus,
        note: Option<String>,
        updated_by: Option<RecordId>,
    ) -> RepoResult<OrderActivity> {
        let entry = OrderActivity {
            id: None,
            order_id: order,
            status,
            note,
            updated_by,
            timestamp: now_millis(),
        };
        let created: Option<OrderActivity> = self
            .base
            .db()
            .create("order_activity")
            .content(entry)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to append activity log".into()))
    }

    pub async fn activity_for_order(&self, order: &RecordId) -> RepoResult<Vec<OrderActivity>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order_activity WHERE order_id = $order ORDER BY timestamp ASC")
            .bind(("order", order.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    /// Admin listing with status/date filters and page/limit.
    ///
    /// `total` and `pages` are computed before the category join; the
    /// category filter (and rows whose product was deleted) drop out of the
    /// fetched page afterwards, so `count` can be smaller than `limit` even
    /// when later pages still hold matches. Pagination happens in memory —
    /// the data set is small and this sidesteps the embedded SDK's
    /// WHERE+LIMIT ordering bug.
    pub async fn list_admin(&self, filter: OrderListFilter) -> RepoResult<OrderListPage> {
        let mut sql = String::from(DETAIL_SELECT);
        let mut conds: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            conds.push("status = $status");
        }
        if filter.from.is_some() {
            conds.push("created_at >= $from");
        }
        if filter.to.is_some() {
            conds.push("created_at <= $to");
        }
        if !conds.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conds.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(from) = filter.from {
            query = query.bind(("from", from));
        }
        if let Some(to) = filter.to {
            query = query.bind(("to", to));
        }

        let mut result = query.await?;
        let rows: Vec<OrderDetail> = result.take(0)?;

        let limit = filter.limit.max(1);
        let page = filter.page.max(1);
        let total = rows.len() as i64;
        let pages = (total + limit - 1) / limit;

        let start = ((page - 1) * limit) as usize;
        let orders: Vec<OrderDetail> = rows
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .filter(|o| match (&filter.category, &o.product_category) {
                // Orders whose product is gone never survive the join
                (_, None) => false,
                (Some(wanted), Some(actual)) => wanted == actual,
                (None, Some(_)) => true,
            })
            .collect();

        Ok(OrderListPage {
            total,
            page,
            pages,
            count: orders.len() as i64,
            orders,
        })
    }

    /// Full unfiltered detail set, newest first (exports)
    pub async fn find_all_detailed(&self) -> RepoResult<Vec<OrderDetail>> {
        let sql = format!("{} ORDER BY created_at DESC", DETAIL_SELECT);
        let mut result = self.base.db().query(sql).await?;
        Ok(result.take(0)?)
    }

    pub async fn count_all(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM order GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    pub async fn count_by_vendor(&self, vendor: &RecordId) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM order WHERE vendor = $vendor GROUP ALL")
            .bind(("vendor", vendor.clone()))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    pub async fn count_by_buyer(&self, buyer: &RecordId) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM order WHERE buyer = $buyer GROUP ALL")
            .bind(("buyer", buyer.clone()))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    /// Sum of delivered order totals (admin dashboard revenue)
    pub async fn delivered_revenue(&self) -> RepoResult<f64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT math::sum(total) AS total FROM order \
                 WHERE status = 'delivered' GROUP ALL",
            )
            .await?;
        let rows: Vec<SumRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0.0))
    }

    pub async fn recent(&self, limit: i64) -> RepoResult<Vec<OrderDetail>> {
        let all = self.find_all_detailed().await?;
        Ok(all.into_iter().take(limit.max(0) as usize).collect())
    }
}
