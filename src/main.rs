use std::sync::Arc;

use ddd_checkout::application::{CheckoutService, CustomerService, ProductCatalogService};
use ddd_checkout::config::AppConfig;
use ddd_checkout::domain::customer::{
    Address, CustomerAddressChangedLogHandler, FirstCustomerCreatedLogHandler,
    SecondCustomerCreatedLogHandler,
};
use ddd_checkout::domain::order::OrderItem;
use ddd_checkout::domain::product::SendEmailWhenProductIsCreatedHandler;
use ddd_checkout::domain::{DomainEventDispatcher, EventKind, Repository};
use ddd_checkout::infrastructure::{connect, CustomerRepository, OrderRepository, ProductRepository};
use ddd_checkout::metrics::Metrics;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, override with RUST_LOG
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ddd_checkout=debug"))
        )
        .init();

    tracing::info!("🚀 Starting checkout demo");

    // === 1. Configuration and storage ===
    let config = AppConfig::from_env()?;
    tracing::info!(url = %config.database.url, "Connecting to database");
    let pool = connect(&config.database).await?;

    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    let customers = CustomerRepository::new(pool.clone()).with_metrics(metrics.clone());
    let products = ProductRepository::new(pool.clone()).with_metrics(metrics.clone());
    let orders = OrderRepository::new(pool).with_metrics(metrics.clone());

    // === 2. Event handlers ===
    let mut dispatcher = DomainEventDispatcher::new().with_metrics(metrics.clone());
    dispatcher.register(EventKind::CustomerCreated, Arc::new(FirstCustomerCreatedLogHandler));
    dispatcher.register(EventKind::CustomerCreated, Arc::new(SecondCustomerCreatedLogHandler));
    dispatcher.register(EventKind::CustomerAddressChanged, Arc::new(CustomerAddressChangedLogHandler));
    dispatcher.register(EventKind::ProductCreated, Arc::new(SendEmailWhenProductIsCreatedHandler));

    // === 3. Customer lifecycle ===
    let customer_service = CustomerService::new(&customers, &dispatcher);
    let customer = customer_service.register("c1", "Customer 1").await?;
    customer_service
        .change_address(customer.id(), Address::new("Street 1", 123, "13330-250", "São Paulo")?)
        .await?;
    let customer = customer_service.activate(customer.id()).await?;
    tracing::info!(customer_id = %customer.id(), active = customer.is_active(), "✅ Customer ready");

    // === 4. Catalogue ===
    let catalog = ProductCatalogService::new(&products, &dispatcher);
    let keyboard = catalog.register("p1", "Keyboard", 100.0).await?;
    let mouse = catalog.register("p2", "Mouse", 40.0).await?;

    // === 5. Checkout ===
    let checkout = CheckoutService::new(&customers, &orders);
    let mut order = checkout
        .place_order(
            customer.id(),
            vec![OrderItem::new("i1", keyboard.name(), keyboard.price(), keyboard.id(), 1)?],
        )
        .await?;
    tracing::info!(order_id = %order.id(), total = order.total(), "✅ Order placed");

    order.add_item(OrderItem::new("i2", mouse.name(), mouse.price(), mouse.id(), 2)?)?;
    orders.update(&order).await?;
    tracing::info!(order_id = %order.id(), total = order.total(), "✅ Order updated");

    order.remove_item("i1")?;
    orders.update(&order).await?;
    tracing::info!(order_id = %order.id(), total = order.total(), "✅ Item removed");

    let stored = orders.find_all().await?;
    tracing::info!(orders = stored.len(), revenue = checkout.revenue().await?, "Orders on file");

    let customer = customers.find(customer.id()).await?;
    tracing::info!(reward_points = customer.reward_points(), "Customer reward points");

    tracing::debug!("Metrics snapshot:\n{}", metrics.render()?);
    tracing::info!("🎉 Demo complete!");

    Ok(())
}
