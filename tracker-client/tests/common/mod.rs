//! Scripted in-memory backend for integration tests
//!
//! Implements `HttpClient` directly: requests are routed to a small model
//! of the order-tracker backend, logged, and can be made to fail on demand.

#![allow(dead_code)]

use async_trait::async_trait;
use http::StatusCode;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracker_client::{
    ClientError, ClientResult, Customer, CustomerId, CustomerPayload, HttpClient, Meal, MealId,
    MealPayload, Order, OrderId, OrderStatus, QueryCache, TrackerClient,
};

pub const BURGER: MealId = 1;
pub const SOUP: MealId = 2;
pub const PASTA: MealId = 3;
pub const ANA: CustomerId = 1;
pub const SEEDED_ORDER: OrderId = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

struct Fault {
    method: &'static str,
    path_prefix: String,
    nth: usize,
    seen: usize,
    status: StatusCode,
    message: String,
}

#[derive(Default)]
struct State {
    customers: BTreeMap<CustomerId, Customer>,
    meals: BTreeMap<MealId, Meal>,
    orders: BTreeMap<OrderId, Order>,
    visits: BTreeMap<String, u64>,
    log_lines: Vec<String>,
    log_tasks: BTreeMap<String, &'static str>,
    next_id: i64,
    log: Vec<Request>,
    faults: Vec<Fault>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

type Reply = Result<Value, ClientError>;

fn reject(status: StatusCode, message: impl Into<String>) -> ClientError {
    ClientError::from_response(status, Some(json!({ "message": message.into() })))
}

fn not_found(what: &str, id: impl std::fmt::Display) -> ClientError {
    reject(StatusCode::NOT_FOUND, format!("{what} not found with id: {id}"))
}

pub fn meal(id: MealId, name: &str, cents: i64, cooking_time: u32) -> Meal {
    Meal {
        id,
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        cooking_time,
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().next_id = 100;
        backend
    }

    /// Catalog of three meals, one customer, and order 7 holding
    /// `[Burger, Burger, Soup]`
    pub fn seeded() -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.lock().unwrap();
            for m in [
                meal(BURGER, "Burger", 500, 10),
                meal(SOUP, "Soup", 350, 5),
                meal(PASTA, "Pasta", 1250, 15),
            ] {
                state.meals.insert(m.id, m);
            }
            state.customers.insert(
                ANA,
                Customer {
                    id: ANA,
                    name: "Ana".into(),
                    phone_number: "+351 900 000 001".into(),
                },
            );
        }
        backend.insert_order(SEEDED_ORDER, ANA, &[BURGER, BURGER, SOUP]);
        backend
    }

    pub fn insert_order(&self, id: OrderId, customer_id: CustomerId, meal_ids: &[MealId]) {
        let mut state = self.state.lock().unwrap();
        let meals = meal_ids
            .iter()
            .map(|id| state.meals[id].clone())
            .collect();
        state.orders.insert(
            id,
            Order {
                id,
                status: OrderStatus::Accepted,
                customer: None,
                customer_id: Some(customer_id),
                meals,
            },
        );
    }

    pub fn record_visit(&self, url: &str, times: u64) {
        *self
            .state
            .lock()
            .unwrap()
            .visits
            .entry(url.to_string())
            .or_default() += times;
    }

    pub fn append_log(&self, line: &str) {
        self.state.lock().unwrap().log_lines.push(line.to_string());
    }

    /// Move an export task straight to `READY`
    pub fn finish_log_task(&self, id: &str) {
        if let Some(status) = self.state.lock().unwrap().log_tasks.get_mut(id) {
            *status = "READY";
        }
    }

    /// Fail the `nth` request (1-based) whose method matches and whose path
    /// starts with `path_prefix`. The failed request changes nothing.
    pub fn fail_on(
        &self,
        method: &'static str,
        path_prefix: &str,
        nth: usize,
        status: StatusCode,
        message: &str,
    ) {
        self.state.lock().unwrap().faults.push(Fault {
            method,
            path_prefix: path_prefix.to_string(),
            nth,
            seen: 0,
            status,
            message: message.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().log.clone()
    }

    /// Number of logged requests matching method and path prefix
    pub fn count(&self, method: &str, path_prefix: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .log
            .iter()
            .filter(|r| r.method == method && r.path.starts_with(path_prefix))
            .count()
    }

    pub fn clear_log(&self) {
        self.state.lock().unwrap().log.clear();
    }

    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.state.lock().unwrap().orders.get(&id).cloned()
    }

    fn handle(&self, method: &'static str, path: &str, body: Option<Value>) -> Reply {
        let mut state = self.state.lock().unwrap();
        state.log.push(Request {
            method,
            path: path.to_string(),
            body: body.clone(),
        });

        for fault in state.faults.iter_mut() {
            if fault.method == method && path.starts_with(&fault.path_prefix) {
                fault.seen += 1;
                if fault.seen == fault.nth {
                    return Err(reject(fault.status, fault.message.clone()));
                }
            }
        }

        let (route, query) = path.split_once('?').unwrap_or((path, ""));
        let query: BTreeMap<String, String> = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), decode(v)))
            .collect();
        let segments: Vec<String> = route.split('/').map(decode).collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        state.route(method, &segments, &query, body)
    }
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

fn parse_id(s: &str) -> Result<i64, ClientError> {
    s.parse()
        .map_err(|_| reject(StatusCode::BAD_REQUEST, format!("invalid id: {s}")))
}

fn param<'a>(query: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str, ClientError> {
    query
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, format!("missing parameter: {key}")))
}

fn parse_body<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ClientError> {
    serde_json::from_value(body.unwrap_or(Value::Null))
        .map_err(|e| reject(StatusCode::BAD_REQUEST, e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Reply {
    Ok(serde_json::to_value(value).expect("serializable"))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealIds {
    meal_ids: Vec<MealId>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn route(
        &mut self,
        method: &str,
        segments: &[&str],
        query: &BTreeMap<String, String>,
        body: Option<Value>,
    ) -> Reply {
        match (method, segments) {
            // ==================== Customers ====================
            ("GET", ["customers"]) => to_json(&self.customers.values().collect::<Vec<_>>()),
            ("GET", ["customers", "name", name]) => self
                .customers
                .values()
                .find(|c| c.name == *name)
                .map(to_json)
                .unwrap_or_else(|| Err(not_found("Customer", name))),
            ("GET", ["customers", "phone", phone]) => self
                .customers
                .values()
                .find(|c| c.phone_number == *phone)
                .map(to_json)
                .unwrap_or_else(|| Err(not_found("Customer", phone))),
            ("GET", ["customers", "filter", "meal"]) => {
                let status: OrderStatus = param(query, "status")?
                    .parse()
                    .map_err(|_| reject(StatusCode::BAD_REQUEST, "invalid status"))?;
                let meal_name = param(query, "mealName")?;
                let ids: Vec<CustomerId> = self
                    .orders
                    .values()
                    .filter(|o| o.status == status && o.meals.iter().any(|m| m.name == meal_name))
                    .filter_map(|o| o.customer_id)
                    .collect();
                let found: Vec<&Customer> = self
                    .customers
                    .values()
                    .filter(|c| ids.contains(&c.id))
                    .collect();
                if found.is_empty() {
                    return Err(reject(StatusCode::NOT_FOUND, "No customers found"));
                }
                to_json(&found)
            }
            ("GET", ["customers", id, "orders"]) => {
                let id = parse_id(id)?;
                if !self.customers.contains_key(&id) {
                    return Err(not_found("Customer", id));
                }
                let orders: Vec<&Order> = self
                    .orders
                    .values()
                    .filter(|o| o.customer_id == Some(id))
                    .collect();
                to_json(&orders)
            }
            ("GET", ["customers", id]) => {
                let id = parse_id(id)?;
                self.customers
                    .get(&id)
                    .map(to_json)
                    .unwrap_or_else(|| Err(not_found("Customer", id)))
            }
            ("POST", ["customers"]) => {
                let payload: CustomerPayload = parse_body(body)?;
                let id = self.next_id();
                let customer = Customer {
                    id,
                    name: payload.name,
                    phone_number: payload.phone_number,
                };
                self.customers.insert(id, customer.clone());
                to_json(&customer)
            }
            ("POST", ["customers", id, "orders"]) => {
                let customer_id = parse_id(id)?;
                if !self.customers.contains_key(&customer_id) {
                    return Err(not_found("Customer", customer_id));
                }
                let MealIds { meal_ids } = parse_body(body)?;
                let meals = self.resolve_meals(&meal_ids)?;
                let id = self.next_id();
                let order = Order {
                    id,
                    status: OrderStatus::Accepted,
                    customer: None,
                    customer_id: Some(customer_id),
                    meals,
                };
                self.orders.insert(id, order.clone());
                to_json(&order)
            }
            ("PUT", ["customers", id]) => {
                let id = parse_id(id)?;
                let payload: CustomerPayload = parse_body(body)?;
                let customer = self
                    .customers
                    .get_mut(&id)
                    .ok_or_else(|| not_found("Customer", id))?;
                customer.name = payload.name;
                customer.phone_number = payload.phone_number;
                to_json(customer)
            }
            ("DELETE", ["customers", id]) => {
                let id = parse_id(id)?;
                self.customers
                    .remove(&id)
                    .map(|_| Value::Null)
                    .ok_or_else(|| not_found("Customer", id))
            }

            // ==================== Meals ====================
            ("GET", ["meals"]) => to_json(&self.meals.values().collect::<Vec<_>>()),
            ("GET", ["meals", "name"]) => {
                let name = param(query, "name")?;
                self.meals
                    .values()
                    .find(|m| m.name == name)
                    .map(to_json)
                    .unwrap_or_else(|| Err(not_found("Meal", name)))
            }
            ("GET", ["meals", id]) => {
                let id = parse_id(id)?;
                self.meals
                    .get(&id)
                    .map(to_json)
                    .unwrap_or_else(|| Err(not_found("Meal", id)))
            }
            ("POST", ["meals"]) => {
                let payload: MealPayload = parse_body(body)?;
                let meal = self.insert_meal(payload);
                to_json(&meal)
            }
            ("POST", ["meals", "bulk"]) => {
                let payloads: Vec<MealPayload> = parse_body(body)?;
                if payloads.is_empty() {
                    return Err(reject(
                        StatusCode::BAD_REQUEST,
                        "Meals list cannot be null or empty",
                    ));
                }
                let meals: Vec<Meal> = payloads.into_iter().map(|p| self.insert_meal(p)).collect();
                to_json(&meals)
            }
            ("PUT", ["meals", id]) => {
                let id = parse_id(id)?;
                let payload: MealPayload = parse_body(body)?;
                let meal = self.meals.get_mut(&id).ok_or_else(|| not_found("Meal", id))?;
                meal.name = payload.name;
                meal.price = payload.price;
                meal.cooking_time = payload.cooking_time;
                to_json(meal)
            }
            ("DELETE", ["meals", id]) => {
                let id = parse_id(id)?;
                self.meals
                    .remove(&id)
                    .map(|_| Value::Null)
                    .ok_or_else(|| not_found("Meal", id))
            }

            // ==================== Orders ====================
            ("GET", ["orders"]) => to_json(&self.orders.values().collect::<Vec<_>>()),
            ("GET", ["orders", id]) => {
                let id = parse_id(id)?;
                self.orders
                    .get(&id)
                    .map(to_json)
                    .unwrap_or_else(|| Err(not_found("Order", id)))
            }
            ("POST", ["orders"]) => {
                let customer_id = parse_id(param(query, "customerId")?)?;
                if !self.customers.contains_key(&customer_id) {
                    return Err(not_found("Customer", customer_id));
                }
                let id = self.next_id();
                let order = Order {
                    id,
                    status: OrderStatus::Accepted,
                    customer: None,
                    customer_id: Some(customer_id),
                    meals: Vec::new(),
                };
                self.orders.insert(id, order.clone());
                to_json(&order)
            }
            ("PUT", ["orders", id, "status"]) => {
                let id = parse_id(id)?;
                let status: OrderStatus = param(query, "status")?
                    .parse()
                    .map_err(|_| reject(StatusCode::BAD_REQUEST, "invalid status"))?;
                let order = self.order_mut(id)?;
                order.status = status;
                to_json(order)
            }
            ("PUT", ["orders", id, "meals", "bulk"]) => {
                let id = parse_id(id)?;
                let MealIds { meal_ids } = parse_body(body)?;
                let meals = self.resolve_meals(&meal_ids)?;
                let order = self.order_mut(id)?;
                order.meals.extend(meals);
                to_json(order)
            }
            ("PUT", ["orders", id, "meals"]) => {
                let id = parse_id(id)?;
                let meal_id = parse_id(param(query, "mealId")?)?;
                let meal = self
                    .meals
                    .get(&meal_id)
                    .cloned()
                    .ok_or_else(|| not_found("Meal", meal_id))?;
                let order = self.order_mut(id)?;
                order.meals.push(meal);
                to_json(order)
            }
            ("DELETE", ["orders", id, "meals"]) => {
                let id = parse_id(id)?;
                let meal_id = parse_id(param(query, "mealId")?)?;
                let order = self.order_mut(id)?;
                let pos = order
                    .meals
                    .iter()
                    .position(|m| m.id == meal_id)
                    .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Meal not in order"))?;
                order.meals.remove(pos);
                Ok(Value::Null)
            }
            ("DELETE", ["orders", id]) => {
                let id = parse_id(id)?;
                self.orders
                    .remove(&id)
                    .map(|_| Value::Null)
                    .ok_or_else(|| not_found("Order", id))
            }

            // ==================== Statistics ====================
            ("GET", ["statistics"]) => to_json(&self.visits),
            ("GET", ["statistics", "single-stat"]) => {
                let url = param(query, "url")?;
                Ok(json!(self.visits.get(url).copied().unwrap_or(0)))
            }
            ("GET", ["statistics", "top-visited"]) => {
                let top = self.visits.iter().max_by_key(|(_, count)| **count);
                Ok(Value::String(match top {
                    Some((url, count)) => format!("Most visited URL: {url} (visits: {count})"),
                    None => "No visits recorded yet".to_string(),
                }))
            }

            // ==================== Logs ====================
            ("GET", ["logs", "view" | "download"]) => {
                let date = param(query, "date")?;
                if date.len() != 10 {
                    return Err(reject(StatusCode::BAD_REQUEST, "invalid date"));
                }
                let lines: Vec<&str> = self
                    .log_lines
                    .iter()
                    .filter(|line| line.contains(date))
                    .map(String::as_str)
                    .collect();
                if lines.is_empty() {
                    return Err(reject(StatusCode::NOT_FOUND, "No logs for date"));
                }
                Ok(Value::String(lines.join("\n")))
            }
            ("POST", ["logs"]) => {
                let id = format!("task-{}", self.next_id());
                self.log_tasks.insert(id.clone(), "CREATED");
                Ok(Value::String(id))
            }
            ("GET", ["logs", id, "status"]) => self
                .log_tasks
                .get(*id)
                .map(|status| Value::String(status.to_string()))
                .ok_or_else(|| not_found("Log task", id)),
            ("GET", ["logs", id, "file"]) => match self.log_tasks.get(*id) {
                Some(&"READY") => Ok(Value::String(format!("Log for {id}"))),
                _ => Err(not_found("Log file", id)),
            },

            _ => Err(reject(
                StatusCode::NOT_FOUND,
                format!("No route for {method} /{}", segments.join("/")),
            )),
        }
    }

    fn insert_meal(&mut self, payload: MealPayload) -> Meal {
        let id = self.next_id();
        let meal = Meal {
            id,
            name: payload.name,
            price: payload.price,
            cooking_time: payload.cooking_time,
        };
        self.meals.insert(id, meal.clone());
        meal
    }

    fn resolve_meals(&self, ids: &[MealId]) -> Result<Vec<Meal>, ClientError> {
        ids.iter()
            .map(|id| {
                self.meals
                    .get(id)
                    .cloned()
                    .ok_or_else(|| not_found("Meal", id))
            })
            .collect()
    }

    fn order_mut(&mut self, id: OrderId) -> Result<&mut Order, ClientError> {
        self.orders.get_mut(&id).ok_or_else(|| not_found("Order", id))
    }
}

fn decode_reply<T: DeserializeOwned>(reply: Reply) -> ClientResult<T> {
    serde_json::from_value(reply?).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        decode_reply(self.handle("GET", path, None))
    }

    async fn get_text(&self, path: &str) -> ClientResult<String> {
        match self.handle("GET", path, None)? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        decode_reply(self.handle("POST", path, Some(body)))
    }

    async fn post_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        decode_reply(self.handle("POST", path, None))
    }

    async fn post_text(&self, path: &str) -> ClientResult<String> {
        match self.handle("POST", path, None)? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        decode_reply(self.handle("PUT", path, Some(body)))
    }

    async fn put_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        decode_reply(self.handle("PUT", path, None))
    }

    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        decode_reply(self.handle("DELETE", path, None))
    }
}

/// Client and cache over a shared seeded backend
pub fn setup() -> (Arc<FakeBackend>, TrackerClient<FakeBackend>, QueryCache) {
    let backend = Arc::new(FakeBackend::seeded());
    let client = TrackerClient::from_shared(Arc::clone(&backend));
    (backend, client, QueryCache::new())
}
