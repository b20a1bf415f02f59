//! `/meals` endpoints

use super::query_pair;
use crate::{ClientResult, HttpClient};
use shared::models::{Meal, MealId, MealPayload};

pub struct MealsApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> MealsApi<'a, C> {
    pub(crate) fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Meal>> {
        self.http.get("meals").await
    }

    pub async fn get_by_id(&self, id: MealId) -> ClientResult<Meal> {
        self.http.get(&format!("meals/{id}")).await
    }

    pub async fn get_by_name(&self, name: &str) -> ClientResult<Meal> {
        self.http
            .get(&format!("meals/name?{}", query_pair("name", name)))
            .await
    }

    pub async fn create(&self, payload: &MealPayload) -> ClientResult<Meal> {
        self.http.post("meals", payload).await
    }

    /// Create several catalog entries in one request
    pub async fn create_bulk(&self, payloads: &[MealPayload]) -> ClientResult<Vec<Meal>> {
        self.http.post("meals/bulk", &payloads).await
    }

    pub async fn update(&self, id: MealId, payload: &MealPayload) -> ClientResult<Meal> {
        self.http.put(&format!("meals/{id}"), payload).await
    }

    pub async fn remove(&self, id: MealId) -> ClientResult<()> {
        self.http.delete(&format!("meals/{id}")).await
    }
}
