//! Data models
//!
//! Wire types for the backend REST API. Field names follow the backend's
//! camelCase JSON; all IDs are `i64`.

pub mod customer;
pub mod logs;
pub mod meal;
pub mod order;
pub mod stats;

// Re-exports
pub use customer::*;
pub use logs::*;
pub use meal::*;
pub use order::*;
pub use stats::*;

use serde::{Deserialize, Deserializer};

/// Decode a JSON `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
