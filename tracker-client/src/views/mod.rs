//! Screen state
//!
//! One container per active screen. Each holds the data it last loaded,
//! its selections, and the notice produced by the last user action. No
//! container shares mutable state with another; they only share the
//! [`QueryCache`](crate::QueryCache), which is how a mutation on one screen
//! makes the others refetch.

mod customer_orders;
mod customers;
mod meals;
mod orders;
mod route;

pub use customer_orders::CustomerOrdersView;
pub use customers::{CustomerForm, CustomersView};
pub use meals::MealsView;
pub use orders::{OrderCard, OrdersView};
pub use route::Route;

use crate::{ClientError, ClientResult};

/// Outcome message of the last user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success(text.into())
    }

    /// Server message when there is one, otherwise `fallback`
    pub fn from_error(err: &ClientError, fallback: &str) -> Self {
        let text = match err {
            ClientError::Validation(app) => app.message.clone(),
            ClientError::PartialRemoval { .. } => err.to_string(),
            other => other
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        };
        Self::Error(text)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }
}

/// Set `notice` from the outcome of an action and pass the result through
pub(crate) fn report<T>(
    notice: &mut Option<Notice>,
    result: ClientResult<T>,
    success: &str,
    failure: &str,
) -> ClientResult<T> {
    *notice = Some(match &result {
        Ok(_) => Notice::success(success),
        Err(err) => {
            tracing::debug!(code = err.code().code(), error = %err, "{failure}");
            Notice::from_error(err, failure)
        }
    });
    result
}
