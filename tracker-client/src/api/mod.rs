//! Typed resource APIs
//!
//! One accessor per backend controller. Path segments and query values are
//! percent-encoded here; callers pass raw values.

mod customers;
mod logs;
mod meals;
mod orders;
mod stats;

pub use customers::CustomersApi;
pub use logs::LogsApi;
pub use meals::MealsApi;
pub use orders::OrdersApi;
pub use stats::StatsApi;

use urlencoding::encode;

/// `segment` encoded for use inside a path
pub(crate) fn path_segment(segment: &str) -> String {
    encode(segment).into_owned()
}

/// `key=value` pair with the value encoded
pub(crate) fn query_pair(key: &str, value: &str) -> String {
    format!("{key}={}", encode(value))
}
