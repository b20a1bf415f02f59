//! Client module - transport and the typed API facade.

pub mod http;
mod tracker;

// Re-export main types
pub use http::{HttpClient, NetworkHttpClient};
pub use tracker::TrackerClient;
