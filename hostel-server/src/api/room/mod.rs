//! Room routes
//!
//! Students join a room through `POST /api/profile/update`; this module
//! serves the allocation view and the warden's room management.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/room", routes())
}

fn routes() -> Router<ServerState> {
    let account_routes = Router::new().route("/my", get(handler::my_room));

    let manage_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}/capacity", patch(handler::update_capacity))
        .layer(middleware::from_fn(require_admin));

    account_routes.merge(manage_routes)
}
