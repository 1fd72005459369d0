//! Leave Request Repository

use super::{RepoError, RepoResult};
use shared::models::{Leave, LeaveCreate, LeaveStatus};
use sqlx::SqlitePool;

const LEAVE_SELECT: &str = "SELECT id, account_id, from_date, from_time, to_date, to_time, no_of_days, reason, status, created_at, updated_at FROM leave_request";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Leave>> {
    let sql = format!("{LEAVE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Leave>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_account(pool: &SqlitePool, account_id: i64) -> RepoResult<Vec<Leave>> {
    let sql = format!("{LEAVE_SELECT} WHERE account_id = ? ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Leave>(&sql)
        .bind(account_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a new request in `pending`. `now` is the creation timestamp.
pub async fn create(
    pool: &SqlitePool,
    account_id: i64,
    data: LeaveCreate,
    now: i64,
) -> RepoResult<Leave> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO leave_request (id, account_id, from_date, from_time, to_date, to_time, no_of_days, reason, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending', ?9, ?9)",
    )
    .bind(id)
    .bind(account_id)
    .bind(&data.from_date)
    .bind(&data.from_time)
    .bind(&data.to_date)
    .bind(&data.to_time)
    .bind(&data.no_of_days)
    .bind(&data.reason)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create leave request".into()))
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: LeaveStatus) -> RepoResult<Leave> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE leave_request SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Leave request {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Leave request {id} not found")))
}

/// Accept every pending request regardless of age. Returns the number moved.
pub async fn accept_pending(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE leave_request SET status = 'accepted', updated_at = ?1 WHERE status = 'pending'",
    )
    .bind(now)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
