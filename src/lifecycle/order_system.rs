use super::config::SystemConfig;
use crate::clients::{OrderClient, ProductClient};
use crate::clock::{Clock, SystemClock};
use crate::order_actor::OrderContext;
use crate::order_number::OrderNumberGenerator;
use std::sync::Arc;
use tracing::{error, info};

/// Starts, wires and stops the actors.
///
/// # Architecture
///
/// - **Product actor**: the stock ledger. Context is the clock.
/// - **Order actor**: order lifecycle. Context is a [`ProductClient`], the order-number
///   generator and the clock.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new();
///
/// let product_id = system.product_client.create_product(product).await?;
/// let order = system.order_client.create_order(order).await?;
/// system.order_client.cancel_order(order.id).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Default configuration and the wall clock. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default(), Arc::new(SystemClock))
    }

    /// Spawns both actors. The clock is shared by the ledger and the order actor.
    pub fn with_config(config: SystemConfig, clock: Arc<dyn Clock>) -> Self {
        let numbers = Arc::new(OrderNumberGenerator::new(config.utc_offset));
        Self::with_numbers(config, clock, numbers)
    }

    /// Like [`with_config`](Self::with_config), continuing from an existing number sequence.
    pub fn with_numbers(
        config: SystemConfig,
        clock: Arc<dyn Clock>,
        numbers: Arc<OrderNumberGenerator>,
    ) -> Self {
        // 1. Create actors
        let (product_actor, product_client) = crate::product_actor::new(config.channel_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.channel_buffer);
        let product_client = ProductClient::new(product_client);
        let order_client = OrderClient::new(order_client);

        // 2. Start them with their context
        let product_handle = tokio::spawn(product_actor.run(clock.clone()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            products: product_client.clone(),
            numbers,
            clock,
        }));

        info!(
            channel_buffer = config.channel_buffer,
            utc_offset = %config.utc_offset,
            "System started"
        );

        Self {
            order_client,
            product_client,
            // order first: its context holds a ProductClient, so the ledger
            // only stops once the order actor has
            handles: vec![order_handle, product_handle],
        }
    }

    /// Drops the clients, which closes the mailboxes, then waits for each actor to drain.
    ///
    /// Returns an error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}
