//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness and database check
//! - [`auth`] - register, login, current account
//! - [`profile`] - personal details, ledger and room assignment
//! - [`food`] - menu, catalog admin, purchase, QR verification
//! - [`orders`] - order history
//! - [`leave`] - leave requests
//! - [`complaint`] - complaints
//! - [`room`] - room allocation and capacity
//!
//! Authentication is applied once at the router level (see
//! [`crate::core::build_app`]); admin-only routes add [`crate::auth::require_admin`].

pub mod auth;
pub mod complaint;
pub mod food;
pub mod health;
pub mod leave;
pub mod orders;
pub mod profile;
pub mod room;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build the API router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(profile::router())
        .merge(food::router())
        .merge(orders::router())
        .merge(leave::router())
        .merge(complaint::router())
        .merge(room::router())
}
