//! Complaint API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Complaint, ComplaintCreate, ComplaintStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, complaint};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/complaint - file a complaint (starts `pending`)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ComplaintCreate>,
) -> AppResult<(StatusCode, Json<Complaint>)> {
    validate_required_text(&payload.complaint_type, "type", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let created =
        complaint::create(&state.pool, user.id, payload, shared::util::now_millis()).await?;
    tracing::info!(
        complaint_id = created.id,
        account_id = user.id,
        complaint_type = %created.complaint_type,
        "Complaint filed"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/complaint/my
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Complaint>>> {
    let complaints = complaint::find_by_account(&state.pool, user.id).await?;
    Ok(Json(complaints))
}

/// PATCH /api/complaint/:id/status
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ComplaintStatusUpdate>,
) -> AppResult<Json<Complaint>> {
    if payload.status.is_pending() {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("status", payload.status.as_str()));
    }

    let updated = complaint::update_status(&state.pool, id, payload.status)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::ComplaintNotFound).with_detail("id", id)
            }
            other => other.into(),
        })?;

    tracing::info!(
        complaint_id = id,
        status = updated.status.as_str(),
        operator_id = user.id,
        "Complaint status updated"
    );

    Ok(Json(updated))
}
