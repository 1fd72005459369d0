//! Order history route

use axum::{Json, Router, extract::State, routing::get};
use shared::models::OrderWithItem;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", get(list))
}

/// GET /api/orders - the current account's orders, newest first
async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OrderWithItem>>> {
    let orders = order::find_by_account(&state.pool, user.id).await?;
    Ok(Json(orders))
}
