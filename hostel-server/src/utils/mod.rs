//! Utilities - shared error types, logging and input validation

pub mod logger;
pub mod validation;

// Unified error and response types live in the shared crate
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
