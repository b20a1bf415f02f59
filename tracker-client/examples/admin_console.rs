// tracker-client/examples/admin_console.rs
// Walks every admin screen against a running backend

use tracker_client::views::{CustomerOrdersView, CustomersView, MealsView, OrdersView};
use tracker_client::{ClientConfig, OrderStatus, QueryCache, Route};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tracker_client=debug")),
        )
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Connecting");
    let client = config.build()?;
    let cache = QueryCache::new();

    // Optional route argument, e.g. `admin_console /orders`
    let route = std::env::args()
        .nth(1)
        .and_then(|path| Route::from_path(&path))
        .unwrap_or_default();
    tracing::info!(%route, title = route.title(), "Opening screen");

    let mut customers = CustomersView::new(client.clone(), cache.clone());
    for customer in customers.refresh().await? {
        tracing::info!(id = customer.id, name = %customer.name, phone = %customer.phone_number, "Customer");
    }

    let mut meals = MealsView::new(client.clone(), cache.clone());
    for meal in meals.refresh().await? {
        tracing::info!(id = meal.id, name = %meal.name, price = %meal.price, minutes = meal.cooking_time, "Meal");
    }

    let mut board = OrdersView::new(client.clone(), cache.clone());
    board.refresh().await?;
    for card in board.cards() {
        tracing::info!(
            order_id = card.order.id,
            status = %card.order.status,
            units = card.unit_count(),
            total = %card.total(),
            "Order"
        );
        for line in &card.lines {
            tracing::info!(meal = %line.meal.name, quantity = line.quantity, subtotal = %line.subtotal(), "  line");
        }
    }

    // Advance the first order that can still move forward
    let next = board
        .cards()
        .iter()
        .find_map(|card| card.order.status.next().map(|status| (card.order.id, status)));
    if let Some((order_id, status)) = next {
        match board.set_status(order_id, status).await {
            Ok(order) => tracing::info!(order_id, status = %order.status, "Status advanced"),
            Err(e) => tracing::warn!(order_id, error = %e, "Status change refused"),
        }
        board.refresh().await?;
    } else if let Some(card) = board.cards().first() {
        tracing::info!(order_id = card.order.id, ready = card.order.status == OrderStatus::Ready, "Nothing to advance");
    }

    let mut per_customer = CustomerOrdersView::new(client.clone(), cache.clone());
    per_customer.refresh().await?;
    if let Some(first) = per_customer.customers().first().map(|c| c.id) {
        per_customer.select_customer(first).await?;
        for order in per_customer.orders() {
            tracing::info!(
                customer_id = first,
                order_id = order.id,
                total = %CustomerOrdersView::<tracker_client::NetworkHttpClient>::order_total(order),
                "Customer order"
            );
        }
    }

    match client.stats().top_visited().await {
        Ok(summary) => tracing::info!(%summary, "Statistics"),
        Err(e) => tracing::warn!(error = %e, "Statistics unavailable"),
    }

    // e.g. LOG_DATE=2024-05-15
    if let Ok(date) = std::env::var("LOG_DATE") {
        match client.logs().view(&date).await {
            Ok(lines) => tracing::info!(%date, lines = lines.lines().count(), "Server log"),
            Err(e) => tracing::warn!(%date, code = e.code().code(), error = %e, "Server log unavailable"),
        }
    }

    Ok(())
}
