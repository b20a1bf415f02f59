//! Cache keys

use shared::models::{CustomerId, OrderId};
use std::fmt;

/// Ordered list of string segments identifying one cached query
///
/// Prefix matching is segment-wise: `["orders"]` matches `["orders", "7"]`
/// but not `["orders-archive"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Key extended by one segment
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` matches this key; the empty key matches everything
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    // ==================== Well-known keys ====================

    pub fn customers() -> Self {
        Self::new(["customers"])
    }

    pub fn meals() -> Self {
        Self::new(["meals"])
    }

    pub fn orders() -> Self {
        Self::new(["orders"])
    }

    pub fn order(id: OrderId) -> Self {
        Self::orders().child(id)
    }

    /// Prefix of every per-customer order list
    pub fn all_customer_orders() -> Self {
        Self::new(["customer-orders"])
    }

    pub fn customer_orders(customer_id: CustomerId) -> Self {
        Self::all_customer_orders().child(customer_id)
    }

    pub fn stats() -> Self {
        Self::new(["statistics"])
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl From<&str> for QueryKey {
    fn from(segment: &str) -> Self {
        Self::new([segment])
    }
}
