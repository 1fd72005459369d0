//! Account Repository

use super::{RepoError, RepoResult};
use shared::models::{Account, AccountCreate, AccountRole, Financial};
use sqlx::{SqliteConnection, SqlitePool};

const ACCOUNT_SELECT: &str = "SELECT id, first_name, last_name, email, phone, student_id, department, year, role, establishment, deposit, balance, created_at, updated_at FROM account";

/// Account row together with its password hash (login only)
#[derive(Debug, sqlx::FromRow)]
pub struct AccountCredentials {
    #[sqlx(flatten)]
    pub account: Account,
    pub hash_pass: String,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Account>> {
    let sql = format!("{ACCOUNT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Account>> {
    let sql = format!("{ACCOUNT_SELECT} WHERE email = ?");
    let row = sqlx::query_as::<_, Account>(&sql)
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> RepoResult<Option<AccountCredentials>> {
    let row = sqlx::query_as::<_, AccountCredentials>(
        "SELECT id, first_name, last_name, email, phone, student_id, department, year, role, establishment, deposit, balance, created_at, updated_at, hash_pass FROM account WHERE email = ?",
    )
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a new account. The opening balance equals `establishment`.
pub async fn create(
    pool: &SqlitePool,
    data: &AccountCreate,
    hash_pass: &str,
    role: AccountRole,
    establishment: f64,
) -> RepoResult<Account> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let result = sqlx::query(
        "INSERT INTO account (id, first_name, last_name, email, phone, student_id, department, year, role, hash_pass, establishment, deposit, balance, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?11, ?12, ?12)",
    )
    .bind(id)
    .bind(data.first_name.trim())
    .bind(data.last_name.trim())
    .bind(data.email.trim())
    .bind(&data.phone)
    .bind(&data.student_id)
    .bind(&data.department)
    .bind(&data.year)
    .bind(role)
    .bind(hash_pass)
    .bind(establishment)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(RepoError::Duplicate(format!(
                "Email {} is already registered",
                data.email.trim()
            )));
        }
        Err(e) => return Err(e.into()),
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create account".into()))
}

pub async fn find_financial(pool: &SqlitePool, id: i64) -> RepoResult<Option<Financial>> {
    let row = sqlx::query_as::<_, Financial>(
        "SELECT establishment, deposit, balance FROM account WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Credit a deposit: `deposit += amount` and `balance += amount` in one statement
pub async fn deposit(pool: &SqlitePool, id: i64, amount: f64) -> RepoResult<Financial> {
    let now = shared::util::now_millis();
    sqlx::query_as::<_, Financial>(
        "UPDATE account SET deposit = ROUND(deposit + ?1, 2), balance = ROUND(balance + ?1, 2), updated_at = ?2 WHERE id = ?3 RETURNING establishment, deposit, balance",
    )
    .bind(amount)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Account {id} not found")))
}

/// Debit `amount` only if the balance covers it.
///
/// Returns `false` when the account is missing or the balance is too low;
/// the caller tells the two apart with [`balance`].
pub async fn debit_if_sufficient(
    conn: &mut SqliteConnection,
    id: i64,
    amount: f64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE account SET balance = ROUND(balance - ?1, 2), updated_at = ?2 WHERE id = ?3 AND balance >= ?1",
    )
    .bind(amount)
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Current balance, read through an open connection
pub async fn balance(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<f64>> {
    let balance: Option<f64> = sqlx::query_scalar("SELECT balance FROM account WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(balance)
}

/// Promote an account to administrator (bootstrap and tests)
pub async fn set_role(pool: &SqlitePool, id: i64, role: AccountRole) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE account SET role = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(role)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {id} not found")));
    }
    Ok(())
}
