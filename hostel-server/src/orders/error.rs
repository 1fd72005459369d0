//! Order errors

use crate::db::repository::RepoError;
use shared::token::TokenError;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised while placing or verifying an order.
///
/// Every variant except `Storage` and `Render` is a validation failure and
/// leaves the ledger, catalog and order table untouched.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    #[error("Insufficient balance: required {required:.2}, available {available:.2}")]
    InsufficientBalance { required: f64, available: f64 },

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    #[error("Order count must be at least 1, got {0}")]
    InvalidCount(i64),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid order date: {0}")]
    InvalidDate(String),

    #[error("Invalid QR data: {0}")]
    MalformedToken(#[from] TokenError),

    #[error("QR rendering failed: {0}")]
    Render(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Storage(err.into())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::AccountNotFound(id) => {
                AppError::new(ErrorCode::AccountNotFound).with_detail("account_id", id)
            }
            OrderError::ItemNotFound(id) => {
                AppError::new(ErrorCode::FoodItemNotFound).with_detail("item_id", id)
            }
            OrderError::InsufficientBalance {
                required,
                available,
            } => AppError::new(ErrorCode::InsufficientBalance)
                .with_detail("required", required)
                .with_detail("available", available),
            OrderError::InsufficientStock {
                requested,
                available,
            } => AppError::new(ErrorCode::InsufficientStock)
                .with_detail("requested", requested)
                .with_detail("available", available),
            OrderError::InvalidCount(count) => {
                AppError::new(ErrorCode::InvalidOrderCount).with_detail("count", count)
            }
            OrderError::InvalidAmount(msg) => AppError::with_message(ErrorCode::InvalidAmount, msg),
            OrderError::InvalidDate(date) => {
                AppError::new(ErrorCode::InvalidOrderDate).with_detail("date", date)
            }
            OrderError::MalformedToken(e) => AppError::new(ErrorCode::MalformedToken)
                .with_detail("reason", e.to_string()),
            OrderError::Render(msg) => {
                tracing::error!(error = %msg, "QR rendering failed");
                AppError::internal("Failed to generate QR code")
            }
            OrderError::Storage(e) => e.into(),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
