/// Represents a catalog product and its inventory counters.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](crate::framework::ResourceActor); see
/// [`product_actor`](crate::product_actor) for the stock ledger actions.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub price: Decimal,
    /// Never negative; only the stock ledger actions change it.
    pub stock: u32,
    /// Signed: the ledger puts no lower bound on it.
    pub sales_count: i64,
    pub is_active: bool,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether new order items may reference this product.
    pub fn is_orderable(&self) -> bool {
        self.is_active && !self.is_deleted()
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ProductCreate {
    pub fn new(title: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            title: title.into(),
            sku: None,
            image_url: None,
            price,
            stock,
            is_active: true,
        }
    }
}

/// Catalog edit. Stock and sales count are not editable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
    pub is_active: Option<bool>,
}
