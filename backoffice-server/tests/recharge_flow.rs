//! Recharge / balance workflow integration tests.
//! Run: cargo test -p backoffice-server --test recharge_flow

mod common;

use backoffice_server::db::models::{RechargeStatus, Role};
use backoffice_server::db::repository::recharge::RechargeListFilter;
use backoffice_server::db::repository::{RechargeRepository, UserRepository};

use common::{create_user, test_db};

#[tokio::test]
async fn submit_then_approve_updates_ledger_and_balance() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let customer = create_user(&db, "alice", Role::Customer, 0.0).await;

    let recharges = RechargeRepository::new(db.clone());
    let users = UserRepository::new(db.clone());

    let entry = recharges
        .submit(
            customer.id.clone().unwrap(),
            "/uploads/recharges/proof.jpg".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(entry.status, RechargeStatus::Pending);
    assert_eq!(entry.amount, 0.0);
    assert_eq!(entry.note.as_deref(), Some("Pending approval"));

    // Pending queue carries the owning user's identity
    let pending = recharges.pending_with_users().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_name.as_deref(), Some("alice"));
    assert_eq!(pending[0].user_email.as_deref(), Some("alice@example.com"));

    let entry_id = entry.id.clone().unwrap().to_string();
    let approved = recharges
        .approve(
            &entry_id,
            50.0,
            "Approved by admin".to_string(),
            admin.id.clone().unwrap(),
        )
        .await
        .unwrap()
        .expect("first approval must succeed");
    assert_eq!(approved.status, RechargeStatus::Approved);
    assert_eq!(approved.amount, 50.0);
    assert_eq!(approved.approved_by, admin.id);

    let updated = users.adjust_balance(&approved.user, 50.0).await.unwrap();
    assert_eq!(updated.balance, 50.0);

    // Queue drains; the owner's ledger shows the approved entry
    assert!(recharges.pending_with_users().await.unwrap().is_empty());
    let ledger = recharges
        .for_user(customer.id.as_ref().unwrap())
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].status, RechargeStatus::Approved);
}

#[tokio::test]
async fn double_approval_is_rejected_and_balance_counts_once() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let customer = create_user(&db, "alice", Role::Customer, 0.0).await;

    let recharges = RechargeRepository::new(db.clone());
    let users = UserRepository::new(db.clone());

    let entry = recharges
        .submit(
            customer.id.clone().unwrap(),
            "/uploads/recharges/proof.jpg".to_string(),
        )
        .await
        .unwrap();
    let entry_id = entry.id.clone().unwrap().to_string();

    let first = recharges
        .approve(&entry_id, 50.0, "ok".to_string(), admin.id.clone().unwrap())
        .await
        .unwrap();
    assert!(first.is_some());
    users
        .adjust_balance(&first.as_ref().unwrap().user, 50.0)
        .await
        .unwrap();

    // The conditional update finds no pending entry the second time, so the
    // balance increment never runs either.
    let second = recharges
        .approve(&entry_id, 50.0, "ok".to_string(), admin.id.clone().unwrap())
        .await
        .unwrap();
    assert!(second.is_none());

    let user = users
        .find_by_id(&customer.id.clone().unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.balance, 50.0);
}

#[tokio::test]
async fn manual_adjustments_hit_the_ledger_and_allow_overdraft() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let customer = create_user(&db, "alice", Role::Customer, 0.0).await;

    let recharges = RechargeRepository::new(db.clone());
    let users = UserRepository::new(db.clone());
    let customer_id = customer.id.clone().unwrap();

    // Negative delta, no lower bound
    let updated = users.adjust_balance(&customer_id, -30.0).await.unwrap();
    assert_eq!(updated.balance, -30.0);

    recharges
        .append_adjustment(
            customer_id.clone(),
            -30.0,
            Some("manual deduction".to_string()),
            admin.id.clone().unwrap(),
        )
        .await
        .unwrap();

    let ledger = recharges.for_user(&customer_id).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].status, RechargeStatus::Approved);
    assert_eq!(ledger[0].amount, -30.0);
    assert_eq!(ledger[0].approved_by, admin.id);
    assert!(ledger[0].screenshot.is_none());
}

#[tokio::test]
async fn deleting_a_users_ledger_returns_screenshot_paths() {
    let db = test_db().await;
    let customer = create_user(&db, "alice", Role::Customer, 0.0).await;
    let customer_id = customer.id.clone().unwrap();

    let recharges = RechargeRepository::new(db.clone());
    recharges
        .submit(customer_id.clone(), "/uploads/recharges/a.jpg".to_string())
        .await
        .unwrap();
    recharges
        .submit(customer_id.clone(), "/uploads/recharges/b.jpg".to_string())
        .await
        .unwrap();

    let removed = recharges.delete_for_user(&customer_id).await.unwrap();
    assert_eq!(removed.len(), 2);
    let mut paths: Vec<String> = removed
        .iter()
        .filter_map(|r| r.screenshot.clone())
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["/uploads/recharges/a.jpg", "/uploads/recharges/b.jpg"]);

    assert!(recharges.for_user(&customer_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_listing_filters_by_status_user_and_date() {
    let db = test_db().await;
    let admin = create_user(&db, "admin", Role::Admin, 0.0).await;
    let alice = create_user(&db, "alice", Role::Customer, 0.0).await;
    let bob = create_user(&db, "bob", Role::Customer, 0.0).await;

    let recharges = RechargeRepository::new(db.clone());
    let pending = recharges
        .submit(
            alice.id.clone().unwrap(),
            "/uploads/recharges/a.jpg".to_string(),
        )
        .await
        .unwrap();
    let approved = recharges
        .submit(
            bob.id.clone().unwrap(),
            "/uploads/recharges/b.jpg".to_string(),
        )
        .await
        .unwrap();
    recharges
        .approve(
            &approved.id.clone().unwrap().to_string(),
            25.0,
            "ok".to_string(),
            admin.id.clone().unwrap(),
        )
        .await
        .unwrap()
        .unwrap();

    let only_pending = recharges
        .list_all(RechargeListFilter {
            status: Some(RechargeStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(only_pending.len(), 1);
    assert_eq!(only_pending[0].user_name.as_deref(), Some("alice"));

    let only_bob = recharges
        .list_all(RechargeListFilter {
            user: bob.id.clone(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(only_bob.len(), 1);
    assert_eq!(only_bob[0].status, RechargeStatus::Approved);

    // Date window excluding everything
    let none = recharges
        .list_all(RechargeListFilter {
            from: Some(pending.created_at + 1_000_000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}
