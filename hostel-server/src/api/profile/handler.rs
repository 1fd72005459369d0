//! Profile API Handlers

use axum::{Json, extract::State};
use shared::models::{
    DepositRequest, DepositResponse, Financial, PersonalInfo, RoomAllocation, RoomAssign,
};
use shared::util::is_valid_date;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, account, room};
use crate::orders::money;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/profile/personal
pub async fn personal(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<PersonalInfo>> {
    let account = account::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;
    Ok(Json(PersonalInfo::from(&account)))
}

/// GET /api/profile/financial - establishment, cumulative deposit, balance
pub async fn financial(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Financial>> {
    let financial = account::find_financial(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;
    Ok(Json(financial))
}

/// POST /api/profile/deposit - credit both `deposit` and `balance`
pub async fn deposit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<DepositRequest>,
) -> AppResult<Json<DepositResponse>> {
    let amount = money::normalize_deposit(req.amount)?;

    let financial = account::deposit(&state.pool, user.id, amount)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::AccountNotFound),
            other => other.into(),
        })?;

    tracing::info!(
        account_id = user.id,
        amount,
        balance = financial.balance,
        "Deposit credited"
    );

    Ok(Json(DepositResponse {
        financial,
        message: format!("Deposited {:.2}", amount),
    }))
}

/// POST /api/profile/update - join (or move to) a room
///
/// Rejected with `RoomFull` when the target room has no free bed; the caller
/// then keeps their previous room.
pub async fn update_room(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<RoomAssign>,
) -> AppResult<Json<RoomAllocation>> {
    validate_required_text(&req.block, "block", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.floor, "floor", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.room_no, "room_no", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.room_type, "room_type", MAX_SHORT_TEXT_LEN)?;
    if !is_valid_date(&req.joining_date) {
        return Err(AppError::validation("joining_date must be YYYY-MM-DD")
            .with_detail("joining_date", req.joining_date.clone()));
    }

    let assigned = room::assign(&state.pool, user.id, &req, shared::util::now_millis()).await?;
    if !assigned {
        return Err(AppError::new(ErrorCode::RoomFull)
            .with_detail("block", req.block.trim())
            .with_detail("room_no", req.room_no.trim()));
    }

    let allocation = room::find_by_account(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::database("Room allocation missing after assignment"))?;

    tracing::info!(
        account_id = user.id,
        room_id = allocation.room.id,
        occupancy = allocation.room.occupancy,
        "Room assigned"
    );

    Ok(Json(allocation))
}
