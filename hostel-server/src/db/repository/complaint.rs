//! Complaint Repository

use super::{RepoError, RepoResult};
use shared::models::{Complaint, ComplaintCreate, ComplaintStatus};
use sqlx::SqlitePool;

const COMPLAINT_SELECT: &str =
    "SELECT id, account_id, complaint_type, description, status, created_at, updated_at FROM complaint";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Complaint>> {
    let sql = format!("{COMPLAINT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Complaint>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_account(pool: &SqlitePool, account_id: i64) -> RepoResult<Vec<Complaint>> {
    let sql = format!("{COMPLAINT_SELECT} WHERE account_id = ? ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Complaint>(&sql)
        .bind(account_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a new complaint in `pending`. `now` is the creation timestamp
/// the dwell time is measured from.
pub async fn create(
    pool: &SqlitePool,
    account_id: i64,
    data: ComplaintCreate,
    now: i64,
) -> RepoResult<Complaint> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO complaint (id, account_id, complaint_type, description, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 'pending', ?5, ?5)",
    )
    .bind(id)
    .bind(account_id)
    .bind(data.complaint_type.trim())
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create complaint".into()))
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: ComplaintStatus,
) -> RepoResult<Complaint> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE complaint SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Complaint {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Complaint {id} not found")))
}

/// Accept pending complaints created at or before `cutoff`. Returns the number moved.
pub async fn accept_pending_older_than(pool: &SqlitePool, cutoff: i64, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE complaint SET status = 'accepted', updated_at = ?1 WHERE status = 'pending' AND created_at <= ?2",
    )
    .bind(now)
    .bind(cutoff)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
