//! Concurrent purchases against limited stock and balance

mod common;

use common::{balance_of, memory_pool, seed_account, seed_item, stock_of};
use hostel_server::db::DbService;
use hostel_server::db::repository::order;
use hostel_server::orders::{OrderError, OrderService, PlaceOrder};
use shared::models::MealSlot;
use sqlx::SqlitePool;

const BUYERS: usize = 12;

fn one_unit(account_id: i64, item_id: i64) -> PlaceOrder {
    PlaceOrder {
        account_id,
        item_id,
        meal: MealSlot::Breakfast,
        date: "2025-06-01".to_string(),
        unit_price: None,
        count: 1,
    }
}

/// Fire `BUYERS` simultaneous single-unit purchases, one per account.
/// Returns (successes, stock rejections).
async fn race_for_stock(pool: &SqlitePool, item_id: i64) -> (usize, usize) {
    let service = OrderService::new(pool.clone());
    let mut handles = Vec::new();
    for i in 0..BUYERS {
        let account = seed_account(pool, &format!("buyer{i}@example.com"), 1_000.0).await;
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.place_order(one_unit(account.id, item_id)).await
        }));
    }

    let mut placed = 0;
    let mut out_of_stock = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => placed += 1,
            Err(OrderError::InsufficientStock { .. }) => out_of_stock += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    (placed, out_of_stock)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_never_oversell() {
    let pool = memory_pool().await;
    let item = seed_item(&pool, "Vada", 15.0, 5).await;

    let (placed, out_of_stock) = race_for_stock(&pool, item.id).await;

    assert_eq!(placed, 5);
    assert_eq!(out_of_stock, BUYERS - 5);
    assert_eq!(stock_of(&pool, item.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hostel.db");
    let pool = DbService::new(path.to_str().unwrap()).await.unwrap().pool;
    let item = seed_item(&pool, "Vada", 15.0, 3).await;

    let (placed, out_of_stock) = race_for_stock(&pool, item.id).await;

    assert_eq!(placed, 3);
    assert_eq!(out_of_stock, BUYERS - 3);
    assert_eq!(stock_of(&pool, item.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_never_overdraw() {
    let pool = memory_pool().await;
    let account = seed_account(&pool, "asha@example.com", 60.0).await;
    let item = seed_item(&pool, "Chai", 20.0, 100).await;
    let service = OrderService::new(pool.clone());

    let handles: Vec<_> = (0..BUYERS)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.place_order(one_unit(account.id, item.id)).await })
        })
        .collect();

    let mut placed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => placed += 1,
            Err(OrderError::InsufficientBalance { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(placed, 3);
    assert_eq!(balance_of(&pool, account.id).await, 0.0);
    assert_eq!(stock_of(&pool, item.id).await, 97);
    assert_eq!(order::count_by_account(&pool, account.id).await.unwrap(), 3);
}

/// One account with ₹100, one ₹50 item with a single unit left, two
/// simultaneous purchases: exactly one wins and the loser leaves no trace.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_purchases_race_for_last_unit() {
    let dir = tempfile::tempdir().unwrap();

    for round in 0..10 {
        let path = dir.path().join(format!("race-{round}.db"));
        let pool = DbService::new(path.to_str().unwrap()).await.unwrap().pool;
        let account = seed_account(&pool, "asha@example.com", 100.0).await;
        let item = seed_item(&pool, "Thali", 50.0, 1).await;
        let service = OrderService::new(pool.clone());

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.place_order(one_unit(account.id, item.id)).await }
        });
        let second = tokio::spawn({
            let service = service.clone();
            async move { service.place_order(one_unit(account.id, item.id)).await }
        });

        let outcomes = [first.await.unwrap(), second.await.unwrap()];
        let placed = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(placed, 1, "round {round}");
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(OrderError::InsufficientStock { .. }))),
            "round {round}"
        );

        assert_eq!(balance_of(&pool, account.id).await, 50.0);
        assert_eq!(stock_of(&pool, item.id).await, 0);
        assert_eq!(order::count_by_account(&pool, account.id).await.unwrap(), 1);
        pool.close().await;
    }
}
