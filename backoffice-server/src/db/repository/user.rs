//! User Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Role, User, UserStatus, UserUpdate};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    total: i64,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, role: Option<Role>) -> RepoResult<Vec<User>> {
        let mut sql = String::from("SELECT * FROM user");
        if role.is_some() {
            sql.push_str(" WHERE role = $role");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(role) = role {
            query = query.bind(("role", role));
        }

        let mut result = query.await?;
        Ok(result.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let record_id = parse_record_id("user", id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE phone = $phone LIMIT 1")
            .bind(("phone", phone.to_string()))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn create(&self, user: User) -> RepoResult<User> {
        let created: Option<User> = self.base.db().create("user").content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".into()))
    }

    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let record_id = parse_record_id("user", id)?;
        let updated: Option<User> = self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    pub async fn update_status(&self, id: &str, status: UserStatus) -> RepoResult<User> {
        let record_id = parse_record_id("user", id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET status = $status RETURN AFTER")
            .bind(("id", record_id))
            .bind(("status", status))
            .await?;
        let updated: Vec<User> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<User>> {
        let record_id = parse_record_id("user", id)?;
        Ok(self.base.db().delete(record_id).await?)
    }

    /// Atomically apply a balance delta and return the updated user.
    ///
    /// No lower bound: negative deltas may take the balance below zero.
    pub async fn adjust_balance(&self, id: &RecordId, delta: f64) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET balance += $delta RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("delta", delta))
            .await?;
        let updated: Vec<User> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Count store + customer accounts (admin dashboard)
    pub async fn count_managed(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM user WHERE role IN ['store', 'customer'] GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
