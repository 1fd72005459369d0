//! Shared fixtures for the integration tests
#![allow(dead_code)]

use hostel_server::db::DbService;
use hostel_server::db::repository::{account, food_item};
use shared::models::{Account, AccountCreate, AccountRole, FoodCategory, FoodItem, FoodItemCreate};
use sqlx::SqlitePool;

pub async fn memory_pool() -> SqlitePool {
    DbService::in_memory()
        .await
        .expect("in-memory database")
        .pool
}

pub fn registration(email: &str) -> AccountCreate {
    AccountCreate {
        first_name: "Asha".to_string(),
        last_name: "Menon".to_string(),
        email: email.to_string(),
        phone: "9876543210".to_string(),
        student_id: "21CS042".to_string(),
        department: "CSE".to_string(),
        year: "3".to_string(),
        password: "hunter22".to_string(),
    }
}

/// Student account whose opening balance is `balance`
pub async fn seed_account(pool: &SqlitePool, email: &str, balance: f64) -> Account {
    account::create(
        pool,
        &registration(email),
        "$argon2id$unused",
        AccountRole::Student,
        balance,
    )
    .await
    .expect("seed account")
}

pub async fn seed_item(pool: &SqlitePool, name: &str, price: f64, stock: i64) -> FoodItem {
    food_item::create(
        pool,
        FoodItemCreate {
            name: name.to_string(),
            price,
            category: FoodCategory::Vegetarian,
            image: None,
            default_meal: None,
            daily_stock: Some(stock),
        },
    )
    .await
    .expect("seed item")
}

pub async fn balance_of(pool: &SqlitePool, account_id: i64) -> f64 {
    account::find_financial(pool, account_id)
        .await
        .unwrap()
        .expect("account exists")
        .balance
}

pub async fn stock_of(pool: &SqlitePool, item_id: i64) -> i64 {
    food_item::find_by_id(pool, item_id)
        .await
        .unwrap()
        .expect("item exists")
        .daily_stock
}
