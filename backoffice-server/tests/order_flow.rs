//! Order workflow integration tests against an in-memory SurrealDB.
//! Run: cargo test -p backoffice-server --test order_flow

mod common;

use backoffice_server::db::models::{Order, OrderStatus, Role, UserUpdate};
use backoffice_server::db::repository::order::OrderListFilter;
use backoffice_server::db::repository::{
    OrderRepository, ProductRepository, RepoError, UserRepository,
};
use backoffice_server::pricing;

use common::{create_product, create_user, test_db};

async fn place_order(
    repo: &OrderRepository,
    buyer: &backoffice_server::db::models::User,
    product: &backoffice_server::db::models::Product,
    created_at: i64,
) -> Order {
    let quote = pricing::quote(product.price, buyer.fee_ratio);
    repo.create(Order {
        id: None,
        product: product.id.clone().unwrap(),
        buyer: buyer.id.clone().unwrap(),
        vendor: product.adopted_by.clone().unwrap(),
        price: quote.price,
        fee: quote.fee,
        total: quote.total,
        status: OrderStatus::Placed,
        created_at,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn order_totals_are_frozen_at_creation() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let vendor = create_user(&db, "vendor", Role::Store, 0.0).await;
    let buyer = create_user(&db, "buyer", Role::Customer, 5.0).await;
    let product = create_product(&db, "Widget", "gadgets", 100.0, &admin, Some(&vendor)).await;

    let orders = OrderRepository::new(db.clone());
    let order = place_order(&orders, &buyer, &product, 1_000).await;

    assert_eq!(order.price, 100.0);
    assert_eq!(order.fee, 5.0);
    assert_eq!(order.total, 105.0);
    assert_eq!(order.status, OrderStatus::Placed);

    // Changing the buyer's fee ratio must not touch the persisted order
    let users = UserRepository::new(db.clone());
    users
        .update(
            &buyer.id.clone().unwrap().to_string(),
            UserUpdate {
                name: None,
                phone: None,
                store_level: None,
                fee_ratio: Some(50.0),
                balance: None,
                is_verified: None,
            },
        )
        .await
        .unwrap();

    let reloaded = orders
        .find_by_id(&order.id.clone().unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.fee, 5.0);
    assert_eq!(reloaded.total, 105.0);
}

#[tokio::test]
async fn any_status_transition_is_accepted_and_logged() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let vendor = create_user(&db, "vendor", Role::Store, 0.0).await;
    let buyer = create_user(&db, "buyer", Role::Customer, 0.0).await;
    let product = create_product(&db, "Widget", "gadgets", 10.0, &admin, Some(&vendor)).await;

    let orders = OrderRepository::new(db.clone());
    let order = place_order(&orders, &buyer, &product, 1_000).await;
    let order_id = order.id.clone().unwrap();

    // No transition validation: delivered -> cancelled -> placed all pass
    let transitions = [
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Placed,
    ];
    for (i, status) in transitions.iter().enumerate() {
        let updated = orders
            .update_status(&order_id.to_string(), *status)
            .await
            .unwrap();
        assert_eq!(updated.status, *status);

        orders
            .append_activity(
                order_id.clone(),
                *status,
                Some(format!("step {}", i)),
                admin.id.clone(),
            )
            .await
            .unwrap();
    }

    // Exactly one log row per transition, each attributed to the actor
    let log = orders.activity_for_order(&order_id).await.unwrap();
    assert_eq!(log.len(), 3);
    for status in &transitions {
        assert_eq!(log.iter().filter(|e| e.status == *status).count(), 1);
    }
    assert!(log.iter().all(|e| e.updated_by == admin.id));
    assert!(log.iter().all(|e| e.note.is_some()));

    let missing = orders
        .update_status("order:doesnotexist", OrderStatus::Delivered)
        .await;
    assert!(matches!(missing, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn category_filter_drops_rows_after_pagination() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let vendor = create_user(&db, "vendor", Role::Store, 0.0).await;
    let buyer = create_user(&db, "buyer", Role::Customer, 0.0).await;

    // Six orders, oldest first: o1..o6. Categories: o1, o2, o3 are "x";
    // the rest are "y". Newest-first page of 5 holds o6..o2.
    let orders = OrderRepository::new(db.clone());
    for i in 1..=6 {
        let category = if i <= 3 { "x" } else { "y" };
        let product = create_product(
            &db,
            &format!("Item {}", i),
            category,
            10.0,
            &admin,
            Some(&vendor),
        )
        .await;
        place_order(&orders, &buyer, &product, (i as i64) * 1_000).await;
    }

    let page = orders
        .list_admin(OrderListFilter {
            status: None,
            category: Some("x".to_string()),
            from: None,
            to: None,
            page: 1,
            limit: 5,
        })
        .await
        .unwrap();

    // total/pages ignore the category join; count reflects the page after it.
    // o1 is category "x" but sits on page 2, so count < the real match count.
    assert_eq!(page.total, 6);
    assert_eq!(page.pages, 2);
    assert_eq!(page.count, 2);
    assert!(page
        .orders
        .iter()
        .all(|o| o.product_category.as_deref() == Some("x")));
}

#[tokio::test]
async fn orders_for_deleted_products_drop_out_of_listings() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let vendor = create_user(&db, "vendor", Role::Store, 0.0).await;
    let buyer = create_user(&db, "buyer", Role::Customer, 0.0).await;

    let orders = OrderRepository::new(db.clone());
    let keep = create_product(&db, "Keep", "x", 10.0, &admin, Some(&vendor)).await;
    let doomed = create_product(&db, "Doomed", "x", 10.0, &admin, Some(&vendor)).await;
    place_order(&orders, &buyer, &keep, 1_000).await;
    place_order(&orders, &buyer, &doomed, 2_000).await;

    let products = ProductRepository::new(db.clone());
    products
        .delete(&doomed.id.clone().unwrap().to_string())
        .await
        .unwrap();

    let page = orders
        .list_admin(OrderListFilter {
            page: 1,
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.count, 1);
    assert_eq!(page.orders[0].product_title.as_deref(), Some("Keep"));
}

#[tokio::test]
async fn adoption_is_one_way_and_exclusive() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let vendor_a = create_user(&db, "shop-a", Role::Store, 0.0).await;
    let vendor_b = create_user(&db, "shop-b", Role::Store, 0.0).await;
    let product = create_product(&db, "Widget", "gadgets", 10.0, &admin, None).await;

    let products = ProductRepository::new(db.clone());
    let id = product.id.clone().unwrap().to_string();

    let adopted = products
        .adopt(&id, vendor_a.id.as_ref().unwrap())
        .await
        .unwrap();
    assert_eq!(adopted.adopted_by, vendor_a.id);

    // A second adoption attempt fails, regardless of which vendor tries
    let second = products.adopt(&id, vendor_b.id.as_ref().unwrap()).await;
    assert!(matches!(second, Err(RepoError::Duplicate(_))));
    let again = products.adopt(&id, vendor_a.id.as_ref().unwrap()).await;
    assert!(matches!(again, Err(RepoError::Duplicate(_))));

    let missing = products
        .adopt("product:nope", vendor_b.id.as_ref().unwrap())
        .await;
    assert!(matches!(missing, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn per_party_order_views_are_scoped() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let vendor_a = create_user(&db, "shop-a", Role::Store, 0.0).await;
    let vendor_b = create_user(&db, "shop-b", Role::Store, 0.0).await;
    let buyer = create_user(&db, "buyer", Role::Customer, 0.0).await;

    let orders = OrderRepository::new(db.clone());
    let p1 = create_product(&db, "A1", "x", 10.0, &admin, Some(&vendor_a)).await;
    let p2 = create_product(&db, "B1", "x", 10.0, &admin, Some(&vendor_b)).await;
    place_order(&orders, &buyer, &p1, 1_000).await;
    place_order(&orders, &buyer, &p2, 2_000).await;

    let for_a = orders
        .find_detail_by_vendor(vendor_a.id.as_ref().unwrap())
        .await
        .unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].product_title.as_deref(), Some("A1"));
    assert_eq!(for_a[0].buyer_name.as_deref(), Some("buyer"));

    let for_buyer = orders
        .find_detail_by_buyer(buyer.id.as_ref().unwrap())
        .await
        .unwrap();
    assert_eq!(for_buyer.len(), 2);
    // Newest first
    assert_eq!(for_buyer[0].product_title.as_deref(), Some("B1"));
}
