//! Error types for the Product actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A decrement would take stock below zero. Nothing was changed.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// An increment would overflow the stock counter.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Translates a framework failure, passing a `ProductError` raised by the actor
    /// through untouched.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e.downcast_entity::<ProductError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
