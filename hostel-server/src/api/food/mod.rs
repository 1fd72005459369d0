//! Food API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/food/daily-menu | GET | none |
//! | /api/food/verify-qr | POST | none (mess counter scanner) |
//! | /api/food/buy | POST | account |
//! | /api/food | POST | admin |

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/food", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/daily-menu", get(handler::daily_menu))
        .route("/verify-qr", post(handler::verify_qr));

    let account_routes = Router::new().route("/buy", post(handler::buy));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(account_routes).merge(manage_routes)
}
