//! Shared fixtures for integration tests (in-memory SurrealDB)

use backoffice_server::db::define_schema;
use backoffice_server::db::models::{Product, Role, StoreLevel, User, UserStatus};
use backoffice_server::db::repository::{ProductRepository, UserRepository};
use backoffice_server::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

pub async fn test_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    define_schema(&db).await.unwrap();
    db
}

pub async fn create_user(db: &Surreal<Db>, name: &str, role: Role, fee_ratio: f64) -> User {
    let repo = UserRepository::new(db.clone());
    repo.create(User {
        id: None,
        name: name.to_string(),
        phone: Some(format!("555-{}", name)),
        email: format!("{}@example.com", name),
        password_hash: String::new(),
        role,
        status: UserStatus::Active,
        is_verified: true,
        store_level: StoreLevel::L800,
        balance: 0.0,
        fee_ratio,
        created_at: now_millis(),
    })
    .await
    .unwrap()
}

pub async fn create_product(
    db: &Surreal<Db>,
    title: &str,
    category: &str,
    price: f64,
    admin: &User,
    vendor: Option<&User>,
) -> Product {
    let repo = ProductRepository::new(db.clone());
    repo.create(Product {
        id: None,
        title: title.to_string(),
        description: None,
        category: category.to_string(),
        price,
        image: None,
        store_levels: vec![StoreLevel::L800],
        fee_ratio: 0.0,
        uploaded_by: admin.id.clone().unwrap(),
        adopted_by: vendor.map(|v| v.id.clone().unwrap()),
        created_at: now_millis(),
    })
    .await
    .unwrap()
}
