//! # Observability
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//! Module paths are hidden (`with_target(false)`); the framework tags every actor line with
//! `entity_type` instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # one line per create / action / status change
//! RUST_LOG=debug cargo run    # plus payloads, stock deltas and issued order numbers
//! ```
//!
//! Placing an order with two lines at `info`:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO create_order: Action ok entity_type="Product" id=product_1
//! INFO create_order: Action ok entity_type="Product" id=product_1
//! INFO create_order: Action ok entity_type="Product" id=product_2
//! INFO create_order: Action ok entity_type="Product" id=product_2
//! INFO create_order: Order accepted order_id=order_1 order_number="2503070001" items=2 total=139.80
//! INFO create_order: Created entity_type="Order" id=order_1 size=1
//! ```
//!
//! Each reservation shows up as two ledger actions: the stock decrement and the
//! sales-count credit. Compensation after a failed line logs at `warn`.

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
