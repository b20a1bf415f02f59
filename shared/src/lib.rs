//! Shared types for the order tracker
//!
//! Wire models, order-composition rules, field validation and error codes
//! used by the client crate and by anything that talks to the backend.

pub mod error;
pub mod models;
pub mod order;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{Customer, CustomerId, Meal, MealId, Order, OrderId, OrderStatus};
pub use order::{LineChange, MealLine, RemovalPlan, RemovalProgress, RemovalStep};
pub use serde::{Deserialize, Serialize};
