//! Tracker Client - typed client for the order-tracker REST API
//!
//! - [`TrackerClient`]: customers, meals, orders, visit statistics and server logs
//! - [`QueryCache`]: keyed remote state with invalidation
//! - [`OrderComposer`]: order mutations wired to the cache
//! - [`views`]: per-screen state for an admin console

pub mod api;
pub mod cache;
pub mod client;
pub mod composer;
pub mod config;
pub mod error;
pub mod views;

pub use cache::{QueryCache, QueryKey, QueryStatus};
pub use client::{HttpClient, NetworkHttpClient, TrackerClient};
pub use composer::OrderComposer;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use views::{Notice, Route};

// Re-export shared types for convenience
pub use shared::models::{
    Customer, CustomerId, CustomerPayload, LogTaskStatus, Meal, MealId, MealPayload, Order,
    OrderId, OrderStatus,
};
pub use shared::order::{LineChange, MealLine};
pub use shared::{AppError, ErrorCode};
