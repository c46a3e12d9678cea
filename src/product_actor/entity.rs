//! [`ActorEntity`] implementation for [`Product`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::clock::Clock;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

impl Product {
    /// Applies `stock += delta`, refusing to go below zero or past `u32::MAX`.
    pub fn adjust_stock(&mut self, delta: i64) -> Result<u32, ProductError> {
        let next = i64::from(self.stock) + delta;
        if next < 0 {
            return Err(ProductError::InsufficientStock {
                requested: u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX),
                available: self.stock,
            });
        }
        self.stock = u32::try_from(next).map_err(|_| ProductError::InvalidQuantity(delta))?;
        Ok(self.stock)
    }

    pub fn adjust_sales_count(&mut self, delta: i64) -> i64 {
        self.sales_count = self.sales_count.saturating_add(delta);
        self.sales_count
    }
}

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price <= Decimal::ZERO {
        return Err(ProductError::ValidationError(format!(
            "price must be positive, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = Arc<dyn Clock>;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if params.title.trim().is_empty() {
            return Err(ProductError::ValidationError("title is required".into()));
        }
        validate_price(params.price)?;
        Ok(Self {
            id,
            title: params.title,
            sku: params.sku,
            image_url: params.image_url,
            price: params.price,
            stock: params.stock,
            sales_count: 0,
            is_active: params.is_active,
            deleted_at: None,
            // stamped in on_create, where the clock is available
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        })
    }

    async fn on_create(&mut self, clock: &Arc<dyn Clock>) -> Result<(), ProductError> {
        let now = clock.now();
        self.created_at = now;
        self.updated_at = now;
        Ok(())
    }

    /// Catalog edits. Stock is untouched here.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        clock: &Arc<dyn Clock>,
    ) -> Result<(), ProductError> {
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(sku) = update.sku {
            self.sku = Some(sku);
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = clock.now();
        Ok(())
    }

    /// Products are never removed: open orders still release stock against them.
    async fn on_delete(&self, _clock: &Arc<dyn Clock>) -> Result<(), ProductError> {
        Err(ProductError::ValidationError(format!(
            "{} cannot be removed, soft delete it instead",
            self.id
        )))
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        clock: &Arc<dyn Clock>,
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::Stock(self.stock)),
            ProductAction::AdjustStock(delta) => {
                let stock = self.adjust_stock(delta)?;
                self.updated_at = clock.now();
                debug!(product_id = %self.id, delta, stock, "Stock adjusted");
                Ok(ProductActionResult::Stock(stock))
            }
            ProductAction::AdjustSalesCount(delta) => {
                let sales_count = self.adjust_sales_count(delta);
                self.updated_at = clock.now();
                debug!(product_id = %self.id, delta, sales_count, "Sales count adjusted");
                Ok(ProductActionResult::SalesCount(sales_count))
            }
            ProductAction::SoftDelete => {
                if self.deleted_at.is_none() {
                    let now = clock.now();
                    self.deleted_at = Some(now);
                    self.updated_at = now;
                }
                Ok(ProductActionResult::Deleted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn product(stock: u32) -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate::new("Camiseta", Decimal::new(5000, 2), stock),
        )
        .unwrap()
    }

    #[test]
    fn decrement_below_zero_changes_nothing() {
        let mut p = product(3);
        assert_eq!(
            p.adjust_stock(-5),
            Err(ProductError::InsufficientStock {
                requested: 5,
                available: 3
            })
        );
        assert_eq!(p.stock, 3);
        assert_eq!(p.adjust_stock(-3), Ok(0));
    }

    #[test]
    fn increment_overflow_is_rejected() {
        let mut p = product(u32::MAX - 1);
        assert_eq!(p.adjust_stock(2), Err(ProductError::InvalidQuantity(2)));
        assert_eq!(p.stock, u32::MAX - 1);
    }

    #[test]
    fn sales_count_has_no_floor() {
        let mut p = product(0);
        assert_eq!(p.adjust_sales_count(2), 2);
        assert_eq!(p.adjust_sales_count(-5), -3);
    }

    #[test]
    fn rejects_non_positive_price() {
        let err = Product::from_create_params(
            ProductId(1),
            ProductCreate::new("Brinde", Decimal::ZERO, 1),
        )
        .unwrap_err();
        assert!(matches!(err, ProductError::ValidationError(_)));
    }

    #[tokio::test]
    async fn soft_delete_keeps_first_timestamp() {
        let first = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let fixed = Arc::new(FixedClock::new(first));
        let clock: Arc<dyn Clock> = fixed.clone();
        let mut p = product(1);

        p.handle_action(ProductAction::SoftDelete, &clock).await.unwrap();
        fixed.advance(chrono::Duration::days(1));
        p.handle_action(ProductAction::SoftDelete, &clock).await.unwrap();

        assert_eq!(p.deleted_at, Some(first));
        assert!(!p.is_orderable());
    }

    #[tokio::test]
    async fn hard_delete_is_refused() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(Utc::now()));
        let err = product(1).on_delete(&clock).await.unwrap_err();
        assert!(matches!(
            err,
            ProductError::ValidationError(ref msg) if msg.contains("soft delete")
        ));
    }
}
