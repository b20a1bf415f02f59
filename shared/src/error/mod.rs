//! Error system for the order tracker
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`AppError`]: Error with code, message and optional details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Meal errors
//! - 8xxx: Customer errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::MealInvalidPrice);
//! assert_eq!(err.code.code(), 6002);
//!
//! let err = AppError::validation("Price must be at least 0.01")
//!     .with_detail("field", "price");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
