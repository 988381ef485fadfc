//! Product Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Product, ProductPublic, ProductUpdate};

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id = parse_record_id("product", id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    /// Adopted products with the adopting vendor's name (public storefront)
    pub async fn find_public(&self) -> RepoResult<Vec<ProductPublic>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT *, adopted_by.name AS vendor_name FROM product \
                 WHERE adopted_by != NONE ORDER BY created_at DESC",
            )
            .await?;
        Ok(result.take(0)?)
    }

    /// Unadopted products available for adoption, optionally by category
    pub async fn find_selectable(&self, category: Option<String>) -> RepoResult<Vec<Product>> {
        let mut sql = String::from("SELECT * FROM product WHERE adopted_by = NONE");
        if category.is_some() {
            sql.push_str(" AND category = $category");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(category) = category {
            query = query.bind(("category", category));
        }

        let mut result = query.await?;
        Ok(result.take(0)?)
    }

    pub async fn find_by_vendor(&self, vendor: &RecordId) -> RepoResult<Vec<Product>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE adopted_by = $vendor ORDER BY created_at DESC")
            .bind(("vendor", vendor.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn create(&self, product: Product) -> RepoResult<Product> {
        let created: Option<Product> = self.base.db().create("product").content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".into()))
    }

    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let record_id = parse_record_id("product", id)?;
        let updated: Option<Product> = self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id = parse_record_id("product", id)?;
        Ok(self.base.db().delete(record_id).await?)
    }

    /// One-way adoption: only succeeds while `adopted_by` is still empty.
    ///
    /// The conditional update is atomic, so two racing vendors cannot both
    /// win; the loser gets `Duplicate`.
    pub async fn adopt(&self, id: &str, vendor: &RecordId) -> RepoResult<Product> {
        let record_id = parse_record_id("product", id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET adopted_by = $vendor WHERE adopted_by = NONE RETURN AFTER")
            .bind(("id", record_id))
            .bind(("vendor", vendor.clone()))
            .await?;
        let updated: Vec<Product> = result.take(0)?;

        if let Some(product) = updated.into_iter().next() {
            return Ok(product);
        }

        // Nothing updated: distinguish a missing product from a lost race
        match self.find_by_id(id).await? {
            Some(_) => Err(RepoError::Duplicate("Product already adopted".into())),
            None => Err(RepoError::NotFound(format!("Product {} not found", id))),
        }
    }
}
