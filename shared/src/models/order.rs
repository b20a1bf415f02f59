//! Order Model

use super::{Customer, CustomerId, Meal, MealId, null_as_default};
use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order identifier (assigned by the server)
pub type OrderId = i64;

/// Order status
///
/// The backend contract is `ACCEPTED -> COOKING -> READY`. Older screens used
/// `PENDING` for the initial state, so it still decodes as `Accepted`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "PENDING")]
    Accepted,
    Cooking,
    Ready,
}

impl OrderStatus {
    /// All statuses in lifecycle order
    pub const ALL: [OrderStatus; 3] = [Self::Accepted, Self::Cooking, Self::Ready];

    /// Wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Cooking => "COOKING",
            Self::Ready => "READY",
        }
    }

    /// The forward step a UI would suggest; `None` once ready
    ///
    /// Only a suggestion: any status may be requested and the server decides.
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Accepted => Some(Self::Cooking),
            Self::Cooking => Some(Self::Ready),
            Self::Ready => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACCEPTED" | "PENDING" => Ok(Self::Accepted),
            "COOKING" => Ok(Self::Cooking),
            "READY" => Ok(Self::Ready),
            other => Err(AppError::with_message(
                ErrorCode::OrderInvalidStatus,
                format!("Unknown order status: {}", other),
            )
            .with_detail("status", other)),
        }
    }
}

/// Order entity
///
/// `meals` is flat: a meal ordered twice appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    /// Usually omitted by the backend (back reference)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    /// Present in some payloads instead of the nested customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: Vec<Meal>,
}

impl Order {
    /// Number of meal units in the order
    pub fn unit_count(&self) -> usize {
        self.meals.len()
    }

    /// Number of units of one meal
    pub fn quantity_of(&self, meal_id: MealId) -> u32 {
        self.meals.iter().filter(|m| m.id == meal_id).count() as u32
    }
}

/// Body of `POST /customers/{id}/orders` and `PUT /orders/{id}/meals/bulk`
///
/// Repeating an id adds that meal more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealIdsRequest {
    pub meal_ids: Vec<MealId>,
}

impl MealIdsRequest {
    pub fn new(meal_ids: impl Into<Vec<MealId>>) -> Self {
        Self {
            meal_ids: meal_ids.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cooking).unwrap(),
            "\"COOKING\""
        );
        let s: OrderStatus = serde_json::from_str("\"READY\"").unwrap();
        assert_eq!(s, OrderStatus::Ready);
    }

    #[test]
    fn test_status_legacy_alias() {
        let s: OrderStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(s, OrderStatus::Accepted);
        assert!(serde_json::from_str::<OrderStatus>("\"CANCELLED\"").is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"COMPLETED\"").is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("cooking".parse::<OrderStatus>().unwrap(), OrderStatus::Cooking);
        assert_eq!("PENDING".parse::<OrderStatus>().unwrap(), OrderStatus::Accepted);
        let err = "lost".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderInvalidStatus);
    }

    #[test]
    fn test_status_next() {
        assert_eq!(OrderStatus::Accepted.next(), Some(OrderStatus::Cooking));
        assert_eq!(OrderStatus::Cooking.next(), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::Ready.next(), None);
        assert!(OrderStatus::Ready.is_terminal());
    }

    #[test]
    fn test_order_decode() {
        let json = r#"{
            "id": 7,
            "status": "COOKING",
            "meals": [
                {"id": 1, "name": "Burger", "price": 5.0, "cookingTime": 10},
                {"id": 1, "name": "Burger", "price": 5.0, "cookingTime": 10},
                {"id": 2, "name": "Soup", "price": 3.5, "cookingTime": 5}
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.status, OrderStatus::Cooking);
        assert!(order.customer.is_none());
        assert_eq!(order.unit_count(), 3);
        assert_eq!(order.quantity_of(1), 2);
        assert_eq!(order.meals[2].price, Decimal::new(35, 1));
    }

    #[test]
    fn test_order_null_meals() {
        let order: Order =
            serde_json::from_str(r#"{"id": 3, "status": "ACCEPTED", "meals": null}"#).unwrap();
        assert!(order.meals.is_empty());
    }

    #[test]
    fn test_meal_ids_request_body() {
        let body = MealIdsRequest::new(vec![1, 1, 2]);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"mealIds": [1, 1, 2]})
        );
    }
}
