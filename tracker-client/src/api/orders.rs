//! `/orders` endpoints
//!
//! Meal mutations work one unit at a time: `add_meal` and `remove_meal`
//! change the quantity of a meal by exactly one. `add_meals_bulk` is the
//! single-request path for multi-unit additions.

use crate::{ClientResult, HttpClient};
use shared::models::{CustomerId, MealId, MealIdsRequest, Order, OrderId, OrderStatus};

pub struct OrdersApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> OrdersApi<'a, C> {
    pub(crate) fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Order>> {
        self.http.get("orders").await
    }

    pub async fn get_by_id(&self, id: OrderId) -> ClientResult<Order> {
        self.http.get(&format!("orders/{id}")).await
    }

    /// Create an empty order for a customer
    pub async fn create(&self, customer_id: CustomerId) -> ClientResult<Order> {
        self.http
            .post_empty(&format!("orders?customerId={customer_id}"))
            .await
    }

    /// Request a status change; the server decides whether it is allowed
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> ClientResult<Order> {
        self.http
            .put_empty(&format!("orders/{id}/status?status={status}"))
            .await
    }

    /// Add one unit of a meal
    pub async fn add_meal(&self, id: OrderId, meal_id: MealId) -> ClientResult<Order> {
        self.http
            .put_empty(&format!("orders/{id}/meals?mealId={meal_id}"))
            .await
    }

    /// Remove one unit of a meal
    pub async fn remove_meal(&self, id: OrderId, meal_id: MealId) -> ClientResult<()> {
        self.http
            .delete(&format!("orders/{id}/meals?mealId={meal_id}"))
            .await
    }

    /// Add every listed unit in one request; repeat an id for quantity
    pub async fn add_meals_bulk(&self, id: OrderId, meal_ids: &[MealId]) -> ClientResult<Order> {
        let body = MealIdsRequest::new(meal_ids);
        self.http.put(&format!("orders/{id}/meals/bulk"), &body).await
    }

    pub async fn remove(&self, id: OrderId) -> ClientResult<()> {
        self.http.delete(&format!("orders/{id}")).await
    }
}
