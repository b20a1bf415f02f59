//! Per-customer order screen

use super::{Notice, report};
use crate::cache::{QueryCache, QueryKey};
use crate::composer::OrderComposer;
use crate::{ClientResult, HttpClient, TrackerClient};
use rust_decimal::Decimal;
use shared::models::{Customer, CustomerId, Meal, MealId, Order};
use shared::order::meals_total;
use shared::{AppError, ErrorCode};

pub struct CustomerOrdersView<C> {
    composer: OrderComposer<C>,
    customers: Vec<Customer>,
    meals: Vec<Meal>,
    selected_customer: Option<CustomerId>,
    orders: Vec<Order>,
    /// Meals for the next order; repeats mean quantity
    selection: Vec<MealId>,
    notice: Option<Notice>,
}

impl<C: HttpClient + 'static> CustomerOrdersView<C> {
    pub fn new(client: TrackerClient<C>, cache: QueryCache) -> Self {
        Self {
            composer: OrderComposer::new(client, cache),
            customers: Vec::new(),
            meals: Vec::new(),
            selected_customer: None,
            orders: Vec::new(),
            selection: Vec::new(),
            notice: None,
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        let id = self.selected_customer?;
        self.customers.iter().find(|c| c.id == id)
    }

    /// Orders of the selected customer as of the last refresh
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order_total(order: &Order) -> Decimal {
        meals_total(&order.meals)
    }

    pub fn selection(&self) -> &[MealId] {
        &self.selection
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Load customers and meals, plus the selected customer's orders
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let cache = self.composer.cache();
        let (customers_key, meals_key) = (QueryKey::customers(), QueryKey::meals());

        let client = self.composer.client().clone();
        let customers = cache.fetch(&customers_key, move || async move {
            client.customers().list().await
        });
        let client = self.composer.client().clone();
        let meals = cache.fetch(&meals_key, move || async move {
            client.meals().list().await
        });

        match futures::try_join!(customers, meals) {
            Ok((customers, meals)) => {
                self.customers = customers;
                self.meals = meals;
            }
            Err(err) => {
                self.notice = Some(Notice::from_error(&err, "Failed to load customers"));
                return Err(err);
            }
        }
        self.load_orders().await
    }

    /// Select a customer and load their orders
    pub async fn select_customer(&mut self, customer_id: CustomerId) -> ClientResult<()> {
        if self.selected_customer != Some(customer_id) {
            self.orders.clear();
        }
        self.selected_customer = Some(customer_id);
        self.load_orders().await
    }

    pub fn clear_customer(&mut self) {
        self.selected_customer = None;
        self.orders.clear();
    }

    async fn load_orders(&mut self) -> ClientResult<()> {
        let Some(customer_id) = self.selected_customer else {
            return Ok(());
        };
        let client = self.composer.client().clone();
        let result = self
            .composer
            .cache()
            .fetch(&QueryKey::customer_orders(customer_id), move || async move {
                client.customers().orders(customer_id).await
            })
            .await;
        match result {
            Ok(orders) => {
                self.orders = orders;
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::from_error(&err, "Failed to load orders"));
                Err(err)
            }
        }
    }

    pub fn pick_meal(&mut self, meal_id: MealId) {
        self.selection.push(meal_id);
    }

    pub fn unpick_meal(&mut self, meal_id: MealId) {
        if let Some(pos) = self.selection.iter().rposition(|id| *id == meal_id) {
            self.selection.remove(pos);
        }
    }

    pub fn set_selection(&mut self, meal_ids: Vec<MealId>) {
        self.selection = meal_ids;
    }

    /// Create an order for the selected customer holding the picked meals
    ///
    /// The selection is cleared only when the server accepts the order.
    pub async fn create_order(&mut self) -> ClientResult<Order> {
        let result = match self.selected_customer {
            Some(customer_id) => {
                self.composer
                    .create_order_with_meals(customer_id, &self.selection)
                    .await
            }
            None => Err(AppError::with_message(
                ErrorCode::CustomerNotFound,
                "Please select a customer first",
            )
            .into()),
        };
        let order = report(
            &mut self.notice,
            result,
            "Order created successfully!",
            "Failed to create order",
        )?;
        self.selection.clear();
        Ok(order)
    }
}
