//! Meal Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Meal identifier (assigned by the server)
pub type MealId = i64;

/// Meal catalog entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    /// Price in currency unit, two decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Cooking time in minutes
    pub cooking_time: u32,
}

/// Create / update meal payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub cooking_time: u32,
}

impl MealPayload {
    pub fn new(name: impl Into<String>, price: Decimal, cooking_time: u32) -> Self {
        Self {
            name: name.into(),
            price,
            cooking_time,
        }
    }
}

impl From<&Meal> for MealPayload {
    fn from(meal: &Meal) -> Self {
        Self {
            name: meal.name.clone(),
            price: meal.price,
            cooking_time: meal.cooking_time,
        }
    }
}
