//! Repository Module
//!
//! CRUD and workflow queries over the embedded SurrealDB.
//!
//! ID 约定：全栈统一使用 "table:id" 字符串，由 [`parse_record_id`]
//! 解析成 `RecordId`；路径参数里允许省略表前缀。

pub mod order;
pub mod payment_config;
pub mod product;
pub mod recharge;
pub mod user;

pub use order::OrderRepository;
pub use payment_config::PaymentConfigRepository;
pub use product::ProductRepository;
pub use recharge::RechargeRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an ID path/query parameter into a `RecordId` of the given table.
///
/// Accepts both `"user:abc"` and bare `"abc"`. A full form naming a
/// different table is rejected.
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    if raw.contains(':') {
        let id: RecordId = raw
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID format: {}", raw)))?;
        if id.table() != table {
            return Err(RepoError::Validation(format!(
                "Expected a {} ID, got: {}",
                table, raw
            )));
        }
        Ok(id)
    } else {
        Ok(RecordId::from_table_key(table, raw))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
