//! # Order Actor
//!
//! Owns placed orders and their status lifecycle. Every stock movement an order causes
//! goes through the Product actor via [`ProductClient`], so the ledger stays the single
//! writer of `stock` and `sales_count`.
//!
//! - [`entity`] - creation (validate, price, reserve, number) and status changes
//! - [`actions`] - [`OrderAction`]
//! - [`error`] - [`OrderError`], [`ErrorKind`], [`ErrorBody`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::clock::Clock;
use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;
use crate::order_number::OrderNumberGenerator;
use std::sync::Arc;

/// Dependencies handed to the Order actor at `run()` time.
#[derive(Clone)]
pub struct OrderContext {
    pub products: ProductClient,
    pub numbers: Arc<OrderNumberGenerator>,
    pub clock: Arc<dyn Clock>,
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
