//! Hostel Server - student hostel mess and records backend
//!
//! # Architecture
//!
//! - **Orders** (`orders`): purchase transaction, QR token issue and verification
//! - **Database** (`db`): SQLite via sqlx, embedded migrations
//! - **Auth** (`auth`): JWT + Argon2
//! - **Services** (`services`): background status sweep for leaves and complaints
//! - **HTTP API** (`api`): REST endpoints
//!
//! # Module layout
//!
//! ```text
//! hostel-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT, extractor, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # pool + repositories
//! ├── orders/        # order placement and verification
//! ├── services/      # status sweeper
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __  __           __       __
   / / / /___  _____/ /____  / /
  / /_/ / __ \/ ___/ __/ _ \/ /
 / __  / /_/ (__  ) /_/  __/ /
/_/ /_/\____/____/\__/\___/_/
    "#
    );
}
