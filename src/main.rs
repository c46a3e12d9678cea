//! Demo run: stock two products, place an order, try to oversell, cancel, list.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use fuseloja::clock::SystemClock;
use fuseloja::lifecycle::{setup_tracing, OrderSystem, SystemConfig};
use fuseloja::model::{OrderCreate, OrderFilter, OrderLine, ProductCreate};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // .env is optional
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = SystemConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting order system");
    let system = OrderSystem::with_config(config, Arc::new(SystemClock));

    let mug = system
        .product_client
        .create_product(ProductCreate::new("Caneca", Decimal::new(5000, 2), 10))
        .await
        .map_err(|e| e.to_string())?;
    let shirt = system
        .product_client
        .create_product(ProductCreate::new("Camiseta", Decimal::new(3990, 2), 3))
        .await
        .map_err(|e| e.to_string())?;
    info!(%mug, %shirt, "Products created");

    let mut params = OrderCreate::new(
        "Maria Souza",
        "+55 11 99999-0000",
        vec![
            OrderLine::new(mug, 2, Decimal::new(5000, 2)),
            OrderLine::new(shirt, 1, Decimal::new(3990, 2)),
        ],
    );
    params.shipping = Some(Decimal::new(1500, 2));

    let span = tracing::info_span!("order_processing");
    let order = async {
        info!("Placing order");
        system.order_client.create_order(params).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(order_number = %order.order_number, total = %order.total, "Order placed");

    let greedy = OrderCreate::new(
        "João",
        "+55 21 98888-0000",
        vec![OrderLine::new(shirt, 5, Decimal::new(3990, 2))],
    );
    match system.order_client.create_order(greedy).await {
        Ok(order) => warn!(order_number = %order.order_number, "Oversell was accepted"),
        Err(e) => info!(code = e.code(), available = ?e.available(), "Oversell refused"),
    }

    let canceled = system
        .order_client
        .cancel_order(order.id)
        .await
        .map_err(|e| e.to_string())?;
    let mug_stock = system
        .product_client
        .check_stock(mug)
        .await
        .map_err(|e| e.to_string())?;
    info!(status = %canceled.status, mug_stock, "Order canceled");

    match system.order_client.list_orders(OrderFilter::default()).await {
        Ok(page) => info!(total = page.total, "Orders on file"),
        Err(e) => error!(error = %e, "Listing failed"),
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
