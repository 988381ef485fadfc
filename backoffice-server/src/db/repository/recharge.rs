//! Recharge Ledger Repository
//!
//! 审批走原子条件更新 (`WHERE status = 'pending'`)：两个并发审批
//! 只有一个能拿到更新后的行，另一个得到 Duplicate。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Recharge, RechargeStatus, RechargeWithUser};
use crate::utils::time::now_millis;

/// Admin cross-user listing filter
#[derive(Debug, Clone, Default)]
pub struct RechargeListFilter {
    pub status: Option<RechargeStatus>,
    pub user: Option<RecordId>,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// Joined projection for admin views
const WITH_USER_SELECT: &str =
    "SELECT *, user.name AS user_name, user.email AS user_email FROM recharge";

#[derive(Clone)]
pub struct RechargeRepository {
    base: BaseRepository,
}

impl RechargeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Record a customer's recharge claim. Pending until an admin approves;
    /// no balance change here.
    pub async fn submit(&self, user: RecordId, screenshot: String) -> RepoResult<Recharge> {
        let entry = Recharge {
            id: None,
            user,
            status: RechargeStatus::Pending,
            amount: 0.0,
            note: Some("Pending approval".to_string()),
            screenshot: Some(screenshot),
            created_at: now_millis(),
            approved_by: None,
            approved_at: None,
        };
        let created: Option<Recharge> = self.base.db().create("recharge").content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to record recharge".into()))
    }

    /// Synthetic pre-approved entry for a manual admin balance adjustment
    pub async fn append_adjustment(
        &self,
        user: RecordId,
        amount: f64,
        note: Option<String>,
        admin: RecordId,
    ) -> RepoResult<Recharge> {
        let now = now_millis();
        let entry = Recharge {
            id: None,
            user,
            status: RechargeStatus::Approved,
            amount,
            note,
            screenshot: None,
            created_at: now,
            approved_by: Some(admin),
            approved_at: Some(now),
        };
        let created: Option<Recharge> = self.base.db().create("recharge").content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to record adjustment".into()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Recharge>> {
        let record_id = parse_record_id("recharge", id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    /// Approve a pending entry: one-way, at most once.
    ///
    /// Returns the updated entry, or `None` when the entry was not pending
    /// anymore (the caller maps that to a conflict).
    pub async fn approve(
        &self,
        id: &str,
        amount: f64,
        note: String,
        admin: RecordId,
    ) -> RepoResult<Option<Recharge>> {
        let record_id = parse_record_id("recharge", id)?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET status = 'approved', amount = $amount, note = $note, \
                 approved_by = $admin, approved_at = $now \
                 WHERE status = 'pending' RETURN AFTER",
            )
            .bind(("id", record_id))
            .bind(("amount", amount))
            .bind(("note", note))
            .bind(("admin", admin))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<Recharge> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// All pending claims across users, oldest first, tagged with the owner
    pub async fn pending_with_users(&self) -> RepoResult<Vec<RechargeWithUser>> {
        let sql = format!(
            "{} WHERE status = 'pending' ORDER BY created_at ASC",
            WITH_USER_SELECT
        );
        let mut result = self.base.db().query(sql).await?;
        Ok(result.take(0)?)
    }

    /// The calling user's own ledger, oldest first
    pub async fn for_user(&self, user: &RecordId) -> RepoResult<Vec<Recharge>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM recharge WHERE user = $user ORDER BY created_at ASC")
            .bind(("user", user.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    /// Admin cross-user view with status/user/date filters
    pub async fn list_all(&self, filter: RechargeListFilter) -> RepoResult<Vec<RechargeWithUser>> {
        let mut sql = String::from(WITH_USER_SELECT);
        let mut conds: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            conds.push("status = $status");
        }
        if filter.user.is_some() {
            conds.push("user = $user");
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
        if let Some(user) = filter.user {
            query = query.bind(("user", user));
        }
        if let Some(from) = filter.from {
            query = query.bind(("from", from));
        }
        if let Some(to) = filter.to {
            query = query.bind(("to", to));
        }

        let mut result = query.await?;
        Ok(result.take(0)?)
    }

    /// Remove a user's whole ledger (user deletion cascade); returns the
    /// deleted rows so the caller can clean up screenshot files.
    pub async fn delete_for_user(&self, user: &RecordId) -> RepoResult<Vec<Recharge>> {
        let mut result = self
            .base
            .db()
            .query("DELETE recharge WHERE user = $user RETURN BEFORE")
            .bind(("user", user.clone()))
            .await?;
        Ok(result.take(0)?)
    }
}
