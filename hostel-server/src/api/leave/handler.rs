//! Leave API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Leave, LeaveCreate, LeaveStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, leave};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/leave - file a leave request (starts `pending`)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<LeaveCreate>,
) -> AppResult<(StatusCode, Json<Leave>)> {
    validate_required_text(&payload.from_date, "from_date", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.from_time, "from_time", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.to_date, "to_date", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.to_time, "to_time", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.no_of_days, "no_of_days", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let created = leave::create(&state.pool, user.id, payload, shared::util::now_millis()).await?;
    tracing::info!(leave_id = created.id, account_id = user.id, "Leave request filed");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/leave/my - the current account's leave requests, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Leave>>> {
    let leaves = leave::find_by_account(&state.pool, user.id).await?;
    Ok(Json(leaves))
}

/// PATCH /api/leave/:id/status - accept or reject
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<LeaveStatusUpdate>,
) -> AppResult<Json<Leave>> {
    if payload.status.is_pending() {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("status", payload.status.as_str()));
    }

    let updated = leave::update_status(&state.pool, id, payload.status)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::LeaveNotFound).with_detail("id", id),
            other => other.into(),
        })?;

    tracing::info!(
        leave_id = id,
        status = updated.status.as_str(),
        operator_id = user.id,
        "Leave status updated"
    );

    Ok(Json(updated))
}
