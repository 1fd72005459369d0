//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Room, RoomAllocation, RoomCapacityUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, room};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Upper bound on beds per room
const MAX_ROOM_CAPACITY: i64 = 20;

/// GET /api/room/my - the caller's room, `null` when none is allocated
pub async fn my_room(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Option<RoomAllocation>>> {
    let allocation = room::find_by_account(&state.pool, user.id).await?;
    Ok(Json(allocation))
}

/// GET /api/room - every room with its occupancy
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(&state.pool).await?;
    Ok(Json(rooms))
}

/// PATCH /api/room/:id/capacity
pub async fn update_capacity(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoomCapacityUpdate>,
) -> AppResult<Json<Room>> {
    if !(1..=MAX_ROOM_CAPACITY).contains(&payload.max_occupancy) {
        return Err(AppError::validation(format!(
            "max_occupancy must be between 1 and {MAX_ROOM_CAPACITY}"
        )));
    }

    let not_found = || AppError::new(ErrorCode::RoomNotFound).with_detail("id", id);
    let changed = room::set_max_occupancy(&state.pool, id, payload.max_occupancy)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => not_found(),
            other => other.into(),
        })?;
    let updated = room::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    if !changed {
        return Err(AppError::new(ErrorCode::RoomCapacityTooLow)
            .with_detail("occupancy", updated.occupancy)
            .with_detail("requested", payload.max_occupancy));
    }

    tracing::info!(
        room_id = id,
        max_occupancy = updated.max_occupancy,
        operator_id = user.id,
        "Room capacity updated"
    );

    Ok(Json(updated))
}
