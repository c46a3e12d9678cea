/// Represents a customer order together with the line items it owns.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](crate::framework::ResourceActor); the lifecycle
/// (creation with stock reservation, status changes with reversal) lives in
/// [`order_actor`](crate::order_actor).
use crate::model::{OrderStatus, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// A line of a placed order.
///
/// Product name, sku and image are copied from the catalog when the order is placed,
/// so later catalog edits leave historical orders untouched. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub product_image: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub discount: Decimal,
    /// `quantity * unit_price`
    pub subtotal: Decimal,
    /// `subtotal - discount`
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// `YYMMDD####`, unique across the store. Empty until the order is accepted.
    pub order_number: String,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub user_id: Option<String>,
    pub customer_id: Option<String>,
    pub address_id: Option<String>,
    pub payment_method: Option<String>,
    pub shipping_method: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
}

/// One requested line: the `items[]` entries of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount: Option<Decimal>,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            discount: None,
        }
    }
}

/// Payload for placing an order: the body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub address_id: Option<String>,
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub shipping: Option<Decimal>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderCreate {
    /// A guest order with no discount or shipping.
    pub fn new(
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        items: Vec<OrderLine>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            customer_email: None,
            user_id: None,
            customer_id: None,
            address_id: None,
            items,
            discount: None,
            shipping: None,
            payment_method: None,
            shipping_method: None,
            notes: None,
        }
    }
}

/// Body of `PATCH /orders/:id/status`. The status stays a raw string until parsed,
/// so an unknown value surfaces as `InvalidStatus` rather than a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// Update payload for the generic CRUD path. Orders only accept note edits there;
/// status goes through [`OrderAction`](crate::order_actor::OrderAction).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub notes: Option<String>,
}
