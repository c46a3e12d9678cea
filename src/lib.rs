//! # FuseLoja order core
//!
//! Order lifecycle for a small storefront: a product stock ledger, order numbering,
//! pricing, and the order state machine, built as resource actors on Tokio.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor per resource
//! [`ResourceActor<T>`](framework::ResourceActor) owns the store for one entity type and
//! handles its mailbox one message at a time. Whatever an entity does inside a single
//! hook is atomic with respect to every other request to that actor. That is how the
//! ledger's conditional decrement, the create-order flow and cancel idempotence hold
//! without locks.
//!
//! ### 2. Typed errors
//! Each actor has its own `thiserror` enum ([`ProductError`](product_actor::ProductError),
//! [`OrderError`](order_actor::OrderError)). Entity errors cross the channel boxed inside
//! [`FrameworkError`](framework::FrameworkError) and are downcast back on the client side.
//!
//! ### 3. Late-bound context
//! Dependencies reach the entity hooks through `run(context)`: the Order actor gets a
//! [`ProductClient`](clients::ProductClient), the [`OrderNumberGenerator`](order_number::OrderNumberGenerator)
//! and a [`Clock`](clock::Clock).
//!
//! ## Module Tour
//!
//! - [`framework`] - generic actor, client, mock
//! - [`model`] - products, orders, statuses, paging
//! - [`pricing`] - line and order totals
//! - [`order_number`] - `YYMMDD####` numbers
//! - [`product_actor`] / [`order_actor`] - the two actors
//! - [`clients`] - typed handles
//! - [`lifecycle`] - wiring, config, tracing
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod clock;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod order_number;
pub mod pricing;
pub mod product_actor;
