//! Startup, wiring and shutdown of the actor system, plus its configuration and logging.
//!
//! - [`OrderSystem`] - spawns the Product and Order actors and hands out their clients
//! - [`SystemConfig`] - environment-driven settings
//! - [`setup_tracing`] - subscriber installation

pub mod config;
pub mod order_system;
pub mod tracing;

pub use config::*;
pub use order_system::*;
pub use self::tracing::setup_tracing;
