//! Shared types for the hostel service
//!
//! Common types used by the server and its API clients: the unified error
//! system, response envelopes, data models and the order token codec.

pub mod error;
pub mod models;
pub mod token;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
