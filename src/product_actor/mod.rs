//! # Product Actor (stock ledger)
//!
//! Owns the catalog and is the only place `stock` and `sales_count` change.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`actions`] - [`ProductAction`] / [`ProductActionResult`]
//! - [`error`] - [`ProductError`]
//!
//! Because the actor handles one message at a time, `AdjustStock(-n)` is a conditional
//! decrement: the availability check and the write cannot be split by another request.
//!
//! ```rust,no_run
//! use fuseloja::clients::ProductClient;
//! use fuseloja::clock::{Clock, SystemClock};
//! use fuseloja::model::ProductCreate;
//! use fuseloja::product_actor;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let (actor, client) = product_actor::new(32);
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//! tokio::spawn(actor.run(clock));
//!
//! let products = ProductClient::new(client);
//! let id = products
//!     .create_product(ProductCreate::new("Caneca", Decimal::new(3990, 2), 10))
//!     .await?;
//! products.reserve(id, 2).await?;
//! assert_eq!(products.check_stock(id).await?, 8);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
