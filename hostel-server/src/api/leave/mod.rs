//! Leave request routes

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/leave", routes())
}

fn routes() -> Router<ServerState> {
    let account_routes = Router::new()
        .route("/", post(handler::create))
        .route("/my", get(handler::list_mine));

    let manage_routes = Router::new()
        .route("/{id}/status", patch(handler::update_status))
        .layer(middleware::from_fn(require_admin));

    account_routes.merge(manage_routes)
}
