//! Profile, ledger and room assignment routes

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/profile", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/personal", get(handler::personal))
        .route("/financial", get(handler::financial))
        .route("/deposit", post(handler::deposit))
        .route("/update", post(handler::update_room))
}
