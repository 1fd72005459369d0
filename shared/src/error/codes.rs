//! Unified error codes for the hostel service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order / token errors
//! - 5xxx: Ledger (account balance) errors
//! - 6xxx: Catalog (food item) errors
//! - 7xxx: Leave / complaint / room record errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that the frontend can
/// switch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Invalid email/password
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email is already registered
    EmailAlreadyRegistered = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// No order matches the request
    OrderNotFound = 4001,
    /// Order token text could not be decoded
    MalformedToken = 4002,
    /// Order count must be a positive integer
    InvalidOrderCount = 4003,
    /// Meal slot is not breakfast, lunch or dinner
    InvalidMealSlot = 4004,
    /// Order date is not a valid calendar date
    InvalidOrderDate = 4005,

    // ==================== 5xxx: Ledger ====================
    /// Account not found
    AccountNotFound = 5001,
    /// Account balance does not cover the purchase
    InsufficientBalance = 5002,
    /// Monetary amount is not a finite positive number
    InvalidAmount = 5003,

    // ==================== 6xxx: Catalog ====================
    /// Food item not found
    FoodItemNotFound = 6001,
    /// Not enough daily stock for the requested count
    InsufficientStock = 6002,
    /// Food item has an invalid price
    FoodItemInvalidPrice = 6003,

    // ==================== 7xxx: Records ====================
    /// Leave request not found
    LeaveNotFound = 7001,
    /// Status change is not allowed
    InvalidStatusTransition = 7002,
    /// Complaint not found
    ComplaintNotFound = 7101,
    /// Room not found
    RoomNotFound = 7201,
    /// Room has no free bed
    RoomFull = 7202,
    /// Capacity would fall below the current occupancy
    RoomCapacityTooLow = 7203,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::MalformedToken => "Invalid QR data",
            ErrorCode::InvalidOrderCount => "Order count must be at least 1",
            ErrorCode::InvalidMealSlot => "Meal must be breakfast, lunch or dinner",
            ErrorCode::InvalidOrderDate => "Order date must be YYYY-MM-DD",

            // Ledger
            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::InsufficientBalance => "Insufficient balance",
            ErrorCode::InvalidAmount => "Amount must be a positive number",

            // Catalog
            ErrorCode::FoodItemNotFound => "Item not found",
            ErrorCode::InsufficientStock => "Not enough stock available",
            ErrorCode::FoodItemInvalidPrice => "Item price must be a positive number",

            // Records
            ErrorCode::LeaveNotFound => "Leave request not found",
            ErrorCode::InvalidStatusTransition => "Status change is not allowed",
            ErrorCode::ComplaintNotFound => "Complaint not found",
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomFull => "Room is fully occupied",
            ErrorCode::RoomCapacityTooLow => "Capacity is below the current occupancy",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::EmailAlreadyRegistered),

            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::MalformedToken),
            4003 => Ok(ErrorCode::InvalidOrderCount),
            4004 => Ok(ErrorCode::InvalidMealSlot),
            4005 => Ok(ErrorCode::InvalidOrderDate),

            5001 => Ok(ErrorCode::AccountNotFound),
            5002 => Ok(ErrorCode::InsufficientBalance),
            5003 => Ok(ErrorCode::InvalidAmount),

            6001 => Ok(ErrorCode::FoodItemNotFound),
            6002 => Ok(ErrorCode::InsufficientStock),
            6003 => Ok(ErrorCode::FoodItemInvalidPrice),

            7001 => Ok(ErrorCode::LeaveNotFound),
            7002 => Ok(ErrorCode::InvalidStatusTransition),
            7101 => Ok(ErrorCode::ComplaintNotFound),
            7201 => Ok(ErrorCode::RoomNotFound),
            7202 => Ok(ErrorCode::RoomFull),
            7203 => Ok(ErrorCode::RoomCapacityTooLow),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::RequiredField,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::EmailAlreadyRegistered,
        ErrorCode::PermissionDenied,
        ErrorCode::AdminRequired,
        ErrorCode::OrderNotFound,
        ErrorCode::MalformedToken,
        ErrorCode::InvalidOrderCount,
        ErrorCode::InvalidMealSlot,
        ErrorCode::InvalidOrderDate,
        ErrorCode::AccountNotFound,
        ErrorCode::InsufficientBalance,
        ErrorCode::InvalidAmount,
        ErrorCode::FoodItemNotFound,
        ErrorCode::InsufficientStock,
        ErrorCode::FoodItemInvalidPrice,
        ErrorCode::LeaveNotFound,
        ErrorCode::InvalidStatusTransition,
        ErrorCode::ComplaintNotFound,
        ErrorCode::RoomNotFound,
        ErrorCode::RoomFull,
        ErrorCode::RoomCapacityTooLow,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::TimeoutError,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn test_every_code_converts_back_from_u16() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::InsufficientStock).unwrap();
        assert_eq!(json, "6002");
        let code: ErrorCode = serde_json::from_str("5002").unwrap();
        assert_eq!(code, ErrorCode::InsufficientBalance);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
        assert_eq!(ErrorCode::MalformedToken.to_string(), "E4002");
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::OrderNotFound.is_success());
    }
}
