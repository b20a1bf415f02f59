//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer identifier (assigned by the server)
pub type CustomerId = i64;

/// Customer entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Create / update customer payload
///
/// The id never travels in the body; updates carry it in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: String,
    pub phone_number: String,
}

impl CustomerPayload {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }
}

impl From<&Customer> for CustomerPayload {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            phone_number: customer.phone_number.clone(),
        }
    }
}
