//! Order composition board
//!
//! Shows every order as a card of grouped meal lines and drives the
//! add/remove/bulk/status/delete actions through [`OrderComposer`].

use super::{Notice, report};
use crate::cache::{QueryCache, QueryKey};
use crate::composer::OrderComposer;
use crate::{ClientResult, HttpClient, TrackerClient};
use rust_decimal::Decimal;
use shared::models::{Customer, CustomerId, Meal, MealId, Order, OrderId, OrderStatus};
use shared::AppError;
use shared::order::{LineChange, MealLine, group_meals, lines_total};

/// One order as displayed: the order plus its grouped lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCard {
    pub order: Order,
    pub lines: Vec<MealLine>,
}

impl OrderCard {
    pub fn new(order: Order) -> Self {
        let lines = group_meals(&order.meals);
        Self { order, lines }
    }

    pub fn total(&self) -> Decimal {
        lines_total(&self.lines)
    }

    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

pub struct OrdersView<C> {
    composer: OrderComposer<C>,
    cards: Vec<OrderCard>,
    meals: Vec<Meal>,
    customers: Vec<Customer>,
    selected_order: Option<OrderId>,
    /// Meals picked for a bulk addition; repeats mean quantity
    selection: Vec<MealId>,
    notice: Option<Notice>,
}

impl<C: HttpClient + 'static> OrdersView<C> {
    pub fn new(client: TrackerClient<C>, cache: QueryCache) -> Self {
        Self {
            composer: OrderComposer::new(client, cache),
            cards: Vec::new(),
            meals: Vec::new(),
            customers: Vec::new(),
            selected_order: None,
            selection: Vec::new(),
            notice: None,
        }
    }

    pub fn cards(&self) -> &[OrderCard] {
        &self.cards
    }

    pub fn card(&self, order_id: OrderId) -> Option<&OrderCard> {
        self.cards.iter().find(|card| card.order.id == order_id)
    }

    /// Catalog offered when adding meals
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Customers offered when creating an order
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Load orders, the meal catalog and customers through the cache
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let cache = self.composer.cache();
        let (orders_key, meals_key, customers_key) =
            (QueryKey::orders(), QueryKey::meals(), QueryKey::customers());

        let client = self.composer.client().clone();
        let orders = cache.fetch(&orders_key, move || async move {
            client.orders().list().await
        });
        let client = self.composer.client().clone();
        let meals = cache.fetch(&meals_key, move || async move {
            client.meals().list().await
        });
        let client = self.composer.client().clone();
        let customers = cache.fetch(&customers_key, move || async move {
            client.customers().list().await
        });

        match futures::try_join!(orders, meals, customers) {
            Ok((orders, meals, customers)) => {
                self.cards = orders.into_iter().map(OrderCard::new).collect();
                self.meals = meals;
                self.customers = customers;
                if self
                    .selected_order
                    .is_some_and(|id| self.card(id).is_none())
                {
                    self.selected_order = None;
                }
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::from_error(&err, "Failed to load orders"));
                Err(err)
            }
        }
    }

    // ==================== Selection ====================

    pub fn selected_order(&self) -> Option<&OrderCard> {
        self.selected_order.and_then(|id| self.card(id))
    }

    pub fn select_order(&mut self, order_id: OrderId) {
        self.selected_order = Some(order_id);
    }

    pub fn clear_selected_order(&mut self) {
        self.selected_order = None;
    }

    pub fn selection(&self) -> &[MealId] {
        &self.selection
    }

    /// Pick one more unit of a meal for the bulk addition
    pub fn pick_meal(&mut self, meal_id: MealId) {
        self.selection.push(meal_id);
    }

    /// Drop one picked unit of a meal
    pub fn unpick_meal(&mut self, meal_id: MealId) {
        if let Some(pos) = self.selection.iter().rposition(|id| *id == meal_id) {
            self.selection.remove(pos);
        }
    }

    pub fn set_selection(&mut self, meal_ids: Vec<MealId>) {
        self.selection = meal_ids;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ==================== Actions ====================

    pub async fn add_meal(&mut self, order_id: OrderId, meal_id: MealId) -> ClientResult<Order> {
        let result = self.composer.add_unit(order_id, meal_id).await;
        let order = report(&mut self.notice, result, "Meal added!", "Failed to add meal")?;
        self.replace_card(order.clone());
        Ok(order)
    }

    /// Send the picked meals to the selected order in one request
    ///
    /// The selection is kept when the request is rejected.
    pub async fn add_selected_meals(&mut self) -> ClientResult<Order> {
        let result = match self.selected_order {
            Some(order_id) => self.composer.add_units(order_id, &self.selection).await,
            None => Err(AppError::validation("Please select an order first")
                .with_detail("field", "orderId")
                .into()),
        };
        let order = report(&mut self.notice, result, "Meals added!", "Failed to add meals")?;
        self.selection.clear();
        self.replace_card(order.clone());
        Ok(order)
    }

    /// Remove one unit; the card changes only after the server confirms
    pub async fn remove_meal(
        &mut self,
        order_id: OrderId,
        meal_id: MealId,
    ) -> ClientResult<Option<LineChange>> {
        let mut lines = self.lines_of(order_id);
        let result = self.composer.remove_unit(&mut lines, order_id, meal_id).await;
        let change = report(&mut self.notice, result, "Meal removed!", "Failed to remove meal")?;
        self.set_lines(order_id, lines);
        Ok(change)
    }

    /// Remove every unit of a meal, one request per unit
    ///
    /// After a partial failure the card shows what the server confirmed.
    pub async fn remove_meal_completely(
        &mut self,
        order_id: OrderId,
        meal_id: MealId,
    ) -> ClientResult<u32> {
        let mut lines = self.lines_of(order_id);
        let result = self.composer.remove_line(&mut lines, order_id, meal_id).await;
        self.set_lines(order_id, lines);
        report(&mut self.notice, result, "Meal removed!", "Failed to remove meal")
    }

    pub async fn set_status(&mut self, order_id: OrderId, status: OrderStatus) -> ClientResult<Order> {
        let result = self.composer.set_status(order_id, status).await;
        let order = report(&mut self.notice, result, "Status updated!", "Failed to update status")?;
        self.replace_card(order.clone());
        Ok(order)
    }

    pub async fn create_order(&mut self, customer_id: CustomerId) -> ClientResult<Order> {
        let result = self.composer.create_order(customer_id).await;
        report(
            &mut self.notice,
            result,
            "Order created successfully!",
            "Failed to create order",
        )
    }

    pub async fn delete_order(&mut self, order_id: OrderId) -> ClientResult<()> {
        let result = self.composer.delete_order(order_id).await;
        report(
            &mut self.notice,
            result,
            "Order deleted successfully!",
            "Failed to delete order",
        )?;
        self.cards.retain(|card| card.order.id != order_id);
        if self.selected_order == Some(order_id) {
            self.selected_order = None;
        }
        Ok(())
    }

    fn lines_of(&self, order_id: OrderId) -> Vec<MealLine> {
        self.card(order_id)
            .map(|card| card.lines.clone())
            .unwrap_or_default()
    }

    fn set_lines(&mut self, order_id: OrderId, lines: Vec<MealLine>) {
        if let Some(card) = self.cards.iter_mut().find(|c| c.order.id == order_id) {
            card.lines = lines;
        }
    }

    /// Show the server's copy of an order until the next refresh
    fn replace_card(&mut self, order: Order) {
        match self.cards.iter_mut().find(|c| c.order.id == order.id) {
            Some(card) => *card = OrderCard::new(order),
            None => self.cards.push(OrderCard::new(order)),
        }
    }
}
