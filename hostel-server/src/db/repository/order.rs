//! Order Repository
//!
//! Orders are insert-only; there is no update or delete.

use super::RepoResult;
use shared::models::{Order, OrderWithItem};
use shared::token::OrderToken;
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_COLUMNS: &str = "o.id, o.account_id, o.item_id, o.meal, o.date, o.count, o.unit_price, o.total_amount, o.qr_text, o.qr_code, o.created_at";

pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO food_order (id, account_id, item_id, meal, date, count, unit_price, total_amount, qr_text, qr_code, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(order.id)
    .bind(order.account_id)
    .bind(order.item_id)
    .bind(order.meal)
    .bind(&order.date)
    .bind(order.count)
    .bind(order.unit_price)
    .bind(order.total_amount)
    .bind(&order.qr_text)
    .bind(&order.qr_code)
    .bind(order.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM food_order o WHERE o.id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Earliest order whose identifying fields equal the token's.
///
/// `count` only narrows the match when the token carries one.
pub async fn find_matching(pool: &SqlitePool, criteria: &OrderToken) -> RepoResult<Option<Order>> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM food_order o WHERE o.account_id = ?1 AND o.item_id = ?2 AND o.meal = ?3 AND o.date = ?4 AND (?5 IS NULL OR o.count = ?5) ORDER BY o.created_at, o.id LIMIT 1"
    );
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(criteria.account_id)
        .bind(criteria.item_id)
        .bind(criteria.meal)
        .bind(&criteria.date)
        .bind(criteria.count)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Order history for one account, newest first
pub async fn find_by_account(pool: &SqlitePool, account_id: i64) -> RepoResult<Vec<OrderWithItem>> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS}, COALESCE(f.name, '') AS item_name FROM food_order o LEFT JOIN food_item f ON f.id = o.item_id WHERE o.account_id = ? ORDER BY o.created_at DESC, o.id DESC"
    );
    let rows = sqlx::query_as::<_, OrderWithItem>(&sql)
        .bind(account_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_by_account(pool: &SqlitePool, account_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM food_order WHERE account_id = ?")
        .bind(account_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
