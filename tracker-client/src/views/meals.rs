//! Meal catalog screen

use super::{Notice, report};
use crate::cache::{QueryCache, QueryKey};
use crate::{ClientResult, HttpClient, TrackerClient};
use shared::models::{Meal, MealId, MealPayload};
use shared::validation::validate_meal;

pub struct MealsView<C> {
    client: TrackerClient<C>,
    cache: QueryCache,
    meals: Vec<Meal>,
    /// `Some(None)` while creating, `Some(Some(meal))` while editing
    editing: Option<Option<Meal>>,
    notice: Option<Notice>,
}

impl<C: HttpClient + 'static> MealsView<C> {
    pub fn new(client: TrackerClient<C>, cache: QueryCache) -> Self {
        Self {
            client,
            cache,
            meals: Vec::new(),
            editing: None,
            notice: None,
        }
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn is_form_open(&self) -> bool {
        self.editing.is_some()
    }

    /// Meal being edited, `None` when creating or closed
    pub fn editing(&self) -> Option<&Meal> {
        self.editing.as_ref().and_then(Option::as_ref)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn refresh(&mut self) -> ClientResult<&[Meal]> {
        let client = self.client.clone();
        let result = self
            .cache
            .fetch(&QueryKey::meals(), move || async move {
                client.meals().list().await
            })
            .await;
        match result {
            Ok(meals) => self.meals = meals,
            Err(err) => {
                self.notice = Some(Notice::from_error(&err, "Failed to load meals"));
                return Err(err);
            }
        }
        Ok(&self.meals)
    }

    pub fn open_create(&mut self) {
        self.editing = Some(None);
    }

    pub fn open_edit(&mut self, meal: Meal) {
        self.editing = Some(Some(meal));
    }

    pub fn close_form(&mut self) {
        self.editing = None;
    }

    /// Validate and submit the open form; stays open on failure
    pub async fn submit(&mut self, payload: MealPayload) -> ClientResult<Meal> {
        let result = self.save(&payload).await;
        let (success, failure) = match self.editing() {
            Some(_) => ("Meal updated successfully!", "Failed to update meal"),
            None => ("Meal created successfully!", "Failed to create meal"),
        };
        let meal = report(&mut self.notice, result, success, failure)?;
        self.editing = None;
        self.invalidate();
        Ok(meal)
    }

    async fn save(&self, payload: &MealPayload) -> ClientResult<Meal> {
        validate_meal(payload)?;
        match self.editing() {
            Some(meal) => self.client.meals().update(meal.id, payload).await,
            None => self.client.meals().create(payload).await,
        }
    }

    pub async fn delete(&mut self, id: MealId) -> ClientResult<()> {
        let result = self.client.meals().remove(id).await;
        report(&mut self.notice, result, "Meal deleted successfully!", "Failed to delete meal")?;
        self.invalidate();
        Ok(())
    }

    pub async fn find_by_name(&self, name: &str) -> ClientResult<Meal> {
        self.client.meals().get_by_name(name).await
    }

    /// Orders embed full meal objects, so catalog changes make them stale too
    fn invalidate(&self) {
        self.cache.invalidate(&QueryKey::meals());
        self.cache.invalidate(&QueryKey::orders());
        self.cache.invalidate(&QueryKey::all_customer_orders());
    }
}
