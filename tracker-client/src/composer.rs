//! Order composition against the server
//!
//! Every mutation follows the same rule: send the request, and only after
//! the server confirms it touch local state and invalidate the order keys.
//! A rejected request leaves both the cache and the caller's lines as they
//! were.

use crate::cache::{QueryCache, QueryKey};
use crate::{ClientError, ClientResult, HttpClient, TrackerClient};
use shared::models::{CustomerId, MealId, Order, OrderId, OrderStatus};
use shared::order::{LineChange, MealLine, RemovalPlan, remove_unit_from_lines};
use shared::{AppError, ErrorCode};

/// Mutations on orders, wired to cache invalidation
#[derive(Debug)]
pub struct OrderComposer<C> {
    client: TrackerClient<C>,
    cache: QueryCache,
}

impl<C> Clone for OrderComposer<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<C: HttpClient> OrderComposer<C> {
    pub fn new(client: TrackerClient<C>, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &TrackerClient<C> {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Add one unit of a meal
    pub async fn add_unit(&self, order_id: OrderId, meal_id: MealId) -> ClientResult<Order> {
        let order = self.client.orders().add_meal(order_id, meal_id).await?;
        self.invalidate_orders();
        Ok(order)
    }

    /// Add several units in one request
    ///
    /// An empty selection is rejected before anything is sent.
    pub async fn add_units(&self, order_id: OrderId, meal_ids: &[MealId]) -> ClientResult<Order> {
        if meal_ids.is_empty() {
            return Err(AppError::empty_selection().into());
        }
        let order = self
            .client
            .orders()
            .add_meals_bulk(order_id, meal_ids)
            .await?;
        tracing::debug!(order_id, units = meal_ids.len(), "Added meals in bulk");
        self.invalidate_orders();
        Ok(order)
    }

    /// Remove one unit of a meal, then mirror it in `lines`
    ///
    /// Returns what happened to the local line, or `None` when `lines` did
    /// not hold that meal.
    pub async fn remove_unit(
        &self,
        lines: &mut Vec<MealLine>,
        order_id: OrderId,
        meal_id: MealId,
    ) -> ClientResult<Option<LineChange>> {
        self.client.orders().remove_meal(order_id, meal_id).await?;
        let change = remove_unit_from_lines(lines, meal_id);
        self.invalidate_orders();
        Ok(change)
    }

    /// Remove `quantity` units of a meal, one request at a time
    ///
    /// Requests are sent strictly in order and the first failure stops the
    /// run. Units already removed stay removed; the failure is reported as
    /// [`ClientError::PartialRemoval`] with the confirmed count.
    pub async fn remove_all(
        &self,
        order_id: OrderId,
        meal_id: MealId,
        quantity: u32,
    ) -> ClientResult<u32> {
        let mut plan = RemovalPlan::new(order_id, meal_id, quantity);
        let result = self.run_plan(&mut plan).await;
        if plan.completed() > 0 {
            self.invalidate_orders();
        }
        result
    }

    /// Remove a whole line, using its quantity from `lines`
    ///
    /// On partial failure the local line keeps only the units the server
    /// did not confirm as removed.
    pub async fn remove_line(
        &self,
        lines: &mut Vec<MealLine>,
        order_id: OrderId,
        meal_id: MealId,
    ) -> ClientResult<u32> {
        let idx = lines
            .iter()
            .position(|line| line.meal.id == meal_id)
            .ok_or_else(|| {
                AppError::new(ErrorCode::OrderMealNotFound).with_detail("mealId", meal_id)
            })?;

        let mut plan = RemovalPlan::for_line(order_id, &lines[idx]);
        let result = self.run_plan(&mut plan).await;
        if plan.completed() > 0 {
            if plan.is_finished() {
                lines.remove(idx);
            } else {
                lines[idx].quantity -= plan.completed();
            }
            self.invalidate_orders();
        }
        result
    }

    async fn run_plan(&self, plan: &mut RemovalPlan) -> ClientResult<u32> {
        while let Some(step) = plan.next_step() {
            if let Err(err) = self
                .client
                .orders()
                .remove_meal(step.order_id, step.meal_id)
                .await
            {
                tracing::error!(
                    order_id = step.order_id,
                    meal_id = step.meal_id,
                    removed = plan.completed(),
                    requested = plan.requested(),
                    error = %err,
                    "Meal removal stopped partway"
                );
                return Err(ClientError::PartialRemoval {
                    removed: plan.completed(),
                    requested: plan.requested(),
                    source: Box::new(err),
                });
            }
            plan.complete_step();
        }
        Ok(plan.completed())
    }

    /// Request a status change; nothing is invalidated if the server refuses
    pub async fn set_status(&self, order_id: OrderId, status: OrderStatus) -> ClientResult<Order> {
        let order = self.client.orders().set_status(order_id, status).await?;
        tracing::debug!(order_id, %status, "Order status changed");
        self.invalidate_orders();
        Ok(order)
    }

    pub async fn create_order(&self, customer_id: CustomerId) -> ClientResult<Order> {
        let order = self.client.orders().create(customer_id).await?;
        self.invalidate_orders();
        Ok(order)
    }

    /// Create an order already holding `meal_ids` (repeats allowed)
    ///
    /// An empty selection is refused without a request.
    pub async fn create_order_with_meals(
        &self,
        customer_id: CustomerId,
        meal_ids: &[MealId],
    ) -> ClientResult<Order> {
        if meal_ids.is_empty() {
            return Err(AppError::empty_selection().into());
        }
        let order = self
            .client
            .customers()
            .create_order(customer_id, meal_ids)
            .await?;
        self.invalidate_orders();
        Ok(order)
    }

    pub async fn delete_order(&self, order_id: OrderId) -> ClientResult<()> {
        self.client.orders().remove(order_id).await?;
        self.cache.remove(&QueryKey::order(order_id));
        self.invalidate_orders();
        Ok(())
    }

    /// Every cached view of orders: the global list, single orders and the
    /// per-customer lists
    fn invalidate_orders(&self) {
        self.cache.invalidate(&QueryKey::orders());
        self.cache.invalidate(&QueryKey::all_customer_orders());
    }
}
