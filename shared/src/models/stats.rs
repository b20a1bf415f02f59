//! Visit statistics
//!
//! The backend counts requests per URL; these are read-only views of it.

use std::collections::BTreeMap;

/// Visit count per URL
pub type VisitCounts = BTreeMap<String, u64>;
