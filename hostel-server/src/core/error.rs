use thiserror::Error;

use crate::auth::JwtError;
use crate::utils::AppError;

/// Startup and serving errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] JwtError),

    #[error("Initialization failed: {0}")]
    Init(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
