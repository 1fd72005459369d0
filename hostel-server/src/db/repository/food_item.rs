//! Food Item Repository

use super::{RepoError, RepoResult};
use shared::models::{DEFAULT_DAILY_STOCK, FoodItem, FoodItemCreate, MealSlot};
use sqlx::{SqliteConnection, SqlitePool};

const FOOD_ITEM_SELECT: &str = "SELECT id, name, price, category, image, default_meal, daily_stock, created_at, updated_at FROM food_item";

const DEFAULT_IMAGE: &str = "/placeholder.svg";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<FoodItem>> {
    let sql = format!("{FOOD_ITEM_SELECT} ORDER BY default_meal, name");
    let rows = sqlx::query_as::<_, FoodItem>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<FoodItem>> {
    let sql = format!("{FOOD_ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, FoodItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: FoodItemCreate) -> RepoResult<FoodItem> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let image = data
        .image
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());
    let default_meal = data.default_meal.unwrap_or(MealSlot::Lunch);
    let daily_stock = data.daily_stock.unwrap_or(DEFAULT_DAILY_STOCK);

    sqlx::query(
        "INSERT INTO food_item (id, name, price, category, image, default_meal, daily_stock, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.category)
    .bind(image)
    .bind(default_meal)
    .bind(daily_stock)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create food item".into()))
}

/// Take `count` units of stock only if that many remain.
///
/// Returns `false` when the item is missing or short; see [`stock`].
pub async fn decrement_stock_if_available(
    conn: &mut SqliteConnection,
    id: i64,
    count: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE food_item SET daily_stock = daily_stock - ?1, updated_at = ?2 WHERE id = ?3 AND daily_stock >= ?1",
    )
    .bind(count)
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Remaining stock, read through an open connection
pub async fn stock(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<i64>> {
    let stock: Option<i64> = sqlx::query_scalar("SELECT daily_stock FROM food_item WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(stock)
}
