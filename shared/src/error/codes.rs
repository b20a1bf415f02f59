//! Error codes for the order tracker
//!
//! Codes are grouped by domain:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Meal errors
//! - 8xxx: Customer errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Response body could not be decoded
    InvalidFormat = 6,

    // ==================== 4xxx: Order ====================
    /// Meal is not part of the order
    OrderMealNotFound = 4002,
    /// No meals selected for a bulk addition or a new order
    OrderEmptySelection = 4003,
    /// A multi-step removal stopped partway
    OrderPartialRemoval = 4004,
    /// Unknown order status
    OrderInvalidStatus = 4005,

    // ==================== 6xxx: Meal ====================
    /// Meal price outside the allowed range
    MealInvalidPrice = 6002,
    /// Cooking time outside the allowed range
    MealInvalidCookingTime = 6003,
    /// Meal name is invalid
    MealInvalidName = 6004,

    // ==================== 8xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 8001,
    /// Customer name is invalid
    CustomerInvalidName = 8002,
    /// Customer phone number is missing
    CustomerPhoneRequired = 8003,

    // ==================== 9xxx: System ====================
    /// Server or client internal failure
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
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

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Order
            ErrorCode::OrderMealNotFound => "Meal is not part of the order",
            ErrorCode::OrderEmptySelection => "Please select at least one meal",
            ErrorCode::OrderPartialRemoval => "Meal removal stopped before completion",
            ErrorCode::OrderInvalidStatus => "Unknown order status",

            // Meal
            ErrorCode::MealInvalidPrice => "Price must be between 0.01 and 9999.99",
            ErrorCode::MealInvalidCookingTime => {
                "Cooking time must be between 1 and 1440 minutes"
            }
            ErrorCode::MealInvalidName => "Meal name is invalid",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerInvalidName => "Customer name is invalid",
            ErrorCode::CustomerPhoneRequired => "Phone number is required",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// Classify a backend rejection status into the closest general code
    ///
    /// The backend does not send codes of its own, only HTTP statuses.
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::ValidationFailed,
            StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => Self::TimeoutError,
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => Self::NetworkError,
            s if s.is_server_error() => Self::InternalError,
            _ => Self::InvalidRequest,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
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
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Order
            4002 => Ok(ErrorCode::OrderMealNotFound),
            4003 => Ok(ErrorCode::OrderEmptySelection),
            4004 => Ok(ErrorCode::OrderPartialRemoval),
            4005 => Ok(ErrorCode::OrderInvalidStatus),

            // Meal
            6002 => Ok(ErrorCode::MealInvalidPrice),
            6003 => Ok(ErrorCode::MealInvalidCookingTime),
            6004 => Ok(ErrorCode::MealInvalidName),

            // Customer
            8001 => Ok(ErrorCode::CustomerNotFound),
            8002 => Ok(ErrorCode::CustomerInvalidName),
            8003 => Ok(ErrorCode::CustomerPhoneRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
