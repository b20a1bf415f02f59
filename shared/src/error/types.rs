//! Application error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Raised by the shared validation rules and by order-composition helpers.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Field name attached by the validation helpers, if any
    pub fn field(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.get("field"))
            .and_then(Value::as_str)
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Reject a bulk addition or a new order with nothing selected
    pub fn empty_selection() -> Self {
        Self::new(ErrorCode::OrderEmptySelection).with_detail("field", "mealIds")
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderMealNotFound);
        assert_eq!(err.code, ErrorCode::OrderMealNotFound);
        assert_eq!(err.message, "Meal is not part of the order");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Cooking time must be at least 1 minute")
            .with_detail("field", "cookingTime")
            .with_detail("min", 1);

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("cookingTime"));
        let details = err.details.unwrap();
        assert_eq!(details.get("min").unwrap(), 1);
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::empty_selection();
        assert_eq!(err.code, ErrorCode::OrderEmptySelection);
        assert_eq!(err.message, "Please select at least one meal");
        assert_eq!(err.field(), Some("mealIds"));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::CustomerNotFound, "Customer 12 not found");
        assert_eq!(format!("{}", err), "Customer 12 not found");
    }
}
