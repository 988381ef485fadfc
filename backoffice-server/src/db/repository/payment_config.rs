//! Payment Config Repository
//!
//! 单例记录，固定 key `payment_config:main`。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{PaymentConfig, PaymentConfigUpdate};

const SINGLETON_KEY: &str = "main";

#[derive(Clone)]
pub struct PaymentConfigRepository {
    base: BaseRepository,
}

impl PaymentConfigRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn singleton_id() -> RecordId {
        RecordId::from_table_key("payment_config", SINGLETON_KEY)
    }

    pub async fn get(&self) -> RepoResult<Option<PaymentConfig>> {
        Ok(self.base.db().select(Self::singleton_id()).await?)
    }

    /// Create or merge the singleton config
    pub async fn upsert(&self, data: PaymentConfigUpdate) -> RepoResult<PaymentConfig> {
        let existing = self.get().await?;
        let updated: Option<PaymentConfig> = if existing.is_some() {
            self.base
                .db()
                .update(Self::singleton_id())
                .merge(data)
                .await?
        } else {
            self.base
                .db()
                .create(Self::singleton_id())
                .content(PaymentConfig {
                    id: None,
                    wechat_id: data.wechat_id,
                    wechat_qr: data.wechat_qr,
                    usdt_address: data.usdt_address,
                    usdt_qr: data.usdt_qr,
                    description1: data.description1,
                    description2: data.description2,
                })
                .await?
        };
        updated.ok_or_else(|| RepoError::Database("Failed to save payment config".into()))
    }
}
