//! Error types for the Order actor.

use crate::framework::FrameworkError;
use crate::model::{OrderStatus, UnknownStatus};
use crate::pricing::PricingError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A line references a product that does not exist or was soft-deleted.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("order must have at least 1 item")]
    EmptyOrder,

    /// A line references an inactive product.
    #[error("product unavailable: {0}")]
    ProductUnavailable(String),

    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    /// The status string is not one of the five known values.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// The status table has no edge `from -> to`.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Malformed order data (missing customer fields, bad quantities or prices).
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The order number is already taken.
    #[error("Order number already exists: {0}")]
    Conflict(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Coarse class of an [`OrderError`], as the HTTP boundary sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

/// Wire form of an error: stable code, human message, and the available quantity
/// when stock ran short.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) | OrderError::ProductNotFound(_) => ErrorKind::NotFound,
            OrderError::EmptyOrder
            | OrderError::ProductUnavailable(_)
            | OrderError::InsufficientStock { .. }
            | OrderError::InvalidStatus(_)
            | OrderError::InvalidTransition { .. }
            | OrderError::ValidationError(_) => ErrorKind::Validation,
            OrderError::Conflict(_) => ErrorKind::Conflict,
            OrderError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            OrderError::NotFound(_) => "ORDER_NOT_FOUND",
            OrderError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            OrderError::EmptyOrder => "EMPTY_ORDER",
            OrderError::ProductUnavailable(_) => "PRODUCT_UNAVAILABLE",
            OrderError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            OrderError::InvalidStatus(_) => "INVALID_STATUS",
            OrderError::InvalidTransition { .. } => "INVALID_STATUS_TRANSITION",
            OrderError::ValidationError(_) => "VALIDATION_ERROR",
            OrderError::Conflict(_) => "ORDER_NUMBER_CONFLICT",
            OrderError::ActorCommunicationError(_) => "INTERNAL_ERROR",
        }
    }

    /// 400 for malformed input, 422 for business-rule rejections, 404, 409, else 500.
    pub fn status_code(&self) -> u16 {
        match self {
            OrderError::ProductUnavailable(_)
            | OrderError::InsufficientStock { .. }
            | OrderError::InvalidTransition { .. } => 422,
            _ => match self.kind() {
                ErrorKind::Validation => 400,
                ErrorKind::NotFound => 404,
                ErrorKind::Conflict => 409,
                ErrorKind::Internal => 500,
            },
        }
    }

    /// Units still in stock, for `InsufficientStock`.
    pub fn available(&self) -> Option<u32> {
        match self {
            OrderError::InsufficientStock { available, .. } => Some(*available),
            _ => None,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
            available: self.available(),
        }
    }

    /// Translates a framework failure, passing an `OrderError` raised by the actor
    /// through untouched.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e.downcast_entity::<OrderError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Conflict(key)) => OrderError::Conflict(key),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<PricingError> for OrderError {
    fn from(e: PricingError) -> Self {
        OrderError::ValidationError(e.to_string())
    }
}

impl From<UnknownStatus> for OrderError {
    fn from(e: UnknownStatus) -> Self {
        OrderError::InvalidStatus(e.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_reports_available_units() {
        let err = OrderError::InsufficientStock {
            product_id: "product_1".into(),
            requested: 5,
            available: 1,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status_code(), 422);
        assert_eq!(
            err.body(),
            ErrorBody {
                code: "INSUFFICIENT_STOCK",
                message: "insufficient stock for product_1: requested 5, available 1".into(),
                available: Some(1),
            }
        );
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(OrderError::EmptyOrder.status_code(), 400);
        assert_eq!(OrderError::InvalidStatus("X".into()).status_code(), 400);
        assert_eq!(OrderError::NotFound("order_1".into()).status_code(), 404);
        assert_eq!(OrderError::ProductNotFound("product_1".into()).status_code(), 404);
        assert_eq!(OrderError::Conflict("2503070001".into()).status_code(), 409);
        assert_eq!(
            OrderError::ActorCommunicationError("closed".into()).status_code(),
            500
        );
    }

    #[test]
    fn framework_errors_map_onto_order_errors() {
        assert_eq!(
            OrderError::from_framework(FrameworkError::NotFound("order_3".into())),
            OrderError::NotFound("order_3".into())
        );
        assert_eq!(
            OrderError::from_framework(FrameworkError::Conflict("2503070001".into())),
            OrderError::Conflict("2503070001".into())
        );
        assert_eq!(
            OrderError::from_framework(FrameworkError::EntityError(Box::new(
                OrderError::EmptyOrder
            ))),
            OrderError::EmptyOrder
        );
        assert!(matches!(
            OrderError::from_framework(FrameworkError::ActorClosed),
            OrderError::ActorCommunicationError(_)
        ));
    }

    #[test]
    fn body_omits_available_when_irrelevant() {
        let json = serde_json::to_value(OrderError::EmptyOrder.body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "EMPTY_ORDER",
                "message": "order must have at least 1 item"
            })
        );
    }
}
