//! Typed API facade over an [`HttpClient`]

use super::http::HttpClient;
use crate::api::{CustomersApi, LogsApi, MealsApi, OrdersApi, StatsApi};
use std::sync::Arc;

/// Entry point for the order-tracker REST API.
///
/// Cheap to clone; every clone shares the same transport.
///
/// # Example
///
/// ```no_run
/// use tracker_client::ClientConfig;
///
/// # async fn example() -> Result<(), tracker_client::ClientError> {
/// let client = ClientConfig::from_env().build()?;
///
/// let order = client.orders().get_by_id(7).await?;
/// let order = client.orders().add_meal(order.id, 3).await?;
/// println!("{} units", order.unit_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TrackerClient<C> {
    http: Arc<C>,
}

impl<C> Clone for TrackerClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl<C: HttpClient> TrackerClient<C> {
    pub fn new(http: C) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    /// Wrap a transport that is already shared
    pub fn from_shared(http: Arc<C>) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn customers(&self) -> CustomersApi<'_, C> {
        CustomersApi::new(&self.http)
    }

    pub fn meals(&self) -> MealsApi<'_, C> {
        MealsApi::new(&self.http)
    }

    pub fn orders(&self) -> OrdersApi<'_, C> {
        OrdersApi::new(&self.http)
    }

    /// Visit-counter statistics
    pub fn stats(&self) -> StatsApi<'_, C> {
        StatsApi::new(&self.http)
    }

    /// Server log viewing and export
    pub fn logs(&self) -> LogsApi<'_, C> {
        LogsApi::new(&self.http)
    }
}
