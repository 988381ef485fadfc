//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus schema definition.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database under `db_dir`
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        db.use_ns("backoffice")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        define_schema(&db).await?;

        tracing::info!("Database ready at {}", db_dir.display());

        Ok(Self { db })
    }
}

/// Define tables and indexes.
///
/// Tables stay SCHEMALESS (models are the source of truth); indexes cover
/// the hot lookups and enforce email uniqueness.
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    const DEFINES: &[&str] = &[
        "DEFINE TABLE IF NOT EXISTS user SCHEMALESS",
        "DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE",
        "DEFINE INDEX IF NOT EXISTS user_phone ON user FIELDS phone",
        "DEFINE TABLE IF NOT EXISTS product SCHEMALESS",
        "DEFINE INDEX IF NOT EXISTS product_category ON product FIELDS category",
        "DEFINE TABLE IF NOT EXISTS order SCHEMALESS",
        "DEFINE INDEX IF NOT EXISTS order_created_at ON order FIELDS created_at",
        "DEFINE TABLE IF NOT EXISTS order_activity SCHEMALESS",
        "DEFINE TABLE IF NOT EXISTS recharge SCHEMALESS",
        "DEFINE INDEX IF NOT EXISTS recharge_user ON recharge FIELDS user",
        "DEFINE TABLE IF NOT EXISTS payment_config SCHEMALESS",
    ];

    for stmt in DEFINES {
        db.query(*stmt)
            .await
            .map_err(|e| AppError::database(format!("Schema definition failed: {}", e)))?;
    }

    Ok(())
}
