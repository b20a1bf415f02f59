//! `/customers` endpoints

use super::{path_segment, query_pair};
use crate::{ClientResult, HttpClient};
use shared::models::{Customer, CustomerId, CustomerPayload, MealId, MealIdsRequest, Order};
use shared::OrderStatus;

pub struct CustomersApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> CustomersApi<'a, C> {
    pub(crate) fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Customer>> {
        self.http.get("customers").await
    }

    pub async fn get_by_id(&self, id: CustomerId) -> ClientResult<Customer> {
        self.http.get(&format!("customers/{id}")).await
    }

    pub async fn get_by_name(&self, name: &str) -> ClientResult<Customer> {
        self.http
            .get(&format!("customers/name/{}", path_segment(name)))
            .await
    }

    pub async fn get_by_phone(&self, phone: &str) -> ClientResult<Customer> {
        self.http
            .get(&format!("customers/phone/{}", path_segment(phone)))
            .await
    }

    pub async fn create(&self, payload: &CustomerPayload) -> ClientResult<Customer> {
        self.http.post("customers", payload).await
    }

    pub async fn update(&self, id: CustomerId, payload: &CustomerPayload) -> ClientResult<Customer> {
        self.http.put(&format!("customers/{id}"), payload).await
    }

    pub async fn remove(&self, id: CustomerId) -> ClientResult<()> {
        self.http.delete(&format!("customers/{id}")).await
    }

    /// Orders placed by one customer
    pub async fn orders(&self, customer_id: CustomerId) -> ClientResult<Vec<Order>> {
        self.http.get(&format!("customers/{customer_id}/orders")).await
    }

    /// Create an order for the customer, optionally with initial meals
    ///
    /// Repeated ids add that meal more than once.
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        meal_ids: &[MealId],
    ) -> ClientResult<Order> {
        let body = MealIdsRequest::new(meal_ids);
        self.http
            .post(&format!("customers/{customer_id}/orders"), &body)
            .await
    }

    /// Customers having an order in `status` that contains `meal_name`
    ///
    /// The backend answers 404 when nobody matches.
    pub async fn filter_by_order(
        &self,
        status: OrderStatus,
        meal_name: &str,
    ) -> ClientResult<Vec<Customer>> {
        self.http
            .get(&format!(
                "customers/filter/meal?{}&{}",
                query_pair("status", status.as_str()),
                query_pair("mealName", meal_name)
            ))
            .await
    }
}
