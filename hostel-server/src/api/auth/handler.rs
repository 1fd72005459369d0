//! Authentication Handlers
//!
//! Registration, login and the current account

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{Account, AccountCreate, AccountRole, LoginRequest, LoginResponse};

use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, account};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - create a student account
///
/// The opening balance equals the configured establishment credit.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<AccountCreate>,
) -> AppResult<(StatusCode, Json<Account>)> {
    validate_required_text(&req.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&req.last_name, "last_name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_required_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.student_id, "student_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.department, "department", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.year, "year", MAX_SHORT_TEXT_LEN)?;

    if account::find_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let hash_pass = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    // The unique index still catches a concurrent registration of the same email
    let account = account::create(
        &state.pool,
        &req,
        &hash_pass,
        AccountRole::Student,
        state.config.default_establishment,
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
        other => other.into(),
    })?;

    tracing::info!(
        account_id = account.id,
        email = %account.email,
        "Account registered"
    );

    Ok((StatusCode::CREATED, Json(account)))
}

/// POST /api/auth/login - exchange credentials for a JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let credentials = account::find_credentials_by_email(&state.pool, &req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let Some(credentials) = credentials else {
        security_log!(
            "WARN",
            "login_failed",
            email = req.email.clone(),
            reason = "account_not_found"
        );
        return Err(AppError::invalid_credentials());
    };

    let password_valid = verify_password(&req.password, &credentials.hash_pass)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        security_log!(
            "WARN",
            "login_failed",
            email = req.email.clone(),
            reason = "invalid_password"
        );
        return Err(AppError::invalid_credentials());
    }

    let account = credentials.account;
    let token = state
        .get_jwt_service()
        .generate_token(account.id, &account.email, account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        account_id = account.id,
        email = %account.email,
        role = account.role.as_str(),
        "Account logged in"
    );

    Ok(Json(LoginResponse { token, account }))
}

/// GET /api/auth/me - the account behind the token
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Account>> {
    let account = account::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;
    Ok(Json(account))
}
