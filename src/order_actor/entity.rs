//! [`ActorEntity`] implementation for [`Order`].
//!
//! Placing an order is one `Create` message: validate and price the payload, check every
//! line against the catalog, reserve stock line by line, then take an order number.
//! Cancelling is one `Action` message that releases the stock before the status flips.
//! Because the Order actor handles one message at a time, two cancels of the same order
//! can never both see a non-terminal status.

use super::actions::OrderAction;
use super::error::OrderError;
use super::OrderContext;
use crate::clients::ProductClient;
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderId, OrderItem, OrderStatus, OrderUpdate, ProductId};
use crate::pricing::price_order;
use crate::product_actor::ProductError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockMove {
    Reserve,
    Release,
}

impl StockMove {
    fn undo(self) -> Self {
        match self {
            StockMove::Reserve => StockMove::Release,
            StockMove::Release => StockMove::Reserve,
        }
    }

    async fn apply(
        self,
        products: &ProductClient,
        id: ProductId,
        quantity: u32,
    ) -> Result<u32, ProductError> {
        match self {
            StockMove::Reserve => products.reserve(id, quantity).await,
            StockMove::Release => products.release(id, quantity).await,
        }
    }
}

/// Reads a ledger failure in terms of the line it happened on.
fn product_failure(product_id: ProductId, e: ProductError) -> OrderError {
    match e {
        ProductError::NotFound(_) => OrderError::ProductNotFound(product_id.to_string()),
        ProductError::InsufficientStock {
            requested,
            available,
        } => OrderError::InsufficientStock {
            product_id: product_id.to_string(),
            requested,
            available,
        },
        ProductError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
        other => OrderError::ValidationError(other.to_string()),
    }
}

impl Order {
    /// Applies `direction` to every line in order. If a line fails, the lines already
    /// moved are moved back before the error is returned.
    async fn move_stock(
        &self,
        products: &ProductClient,
        direction: StockMove,
    ) -> Result<(), OrderError> {
        for (done, item) in self.items.iter().enumerate() {
            if let Err(e) = direction
                .apply(products, item.product_id, item.quantity)
                .await
            {
                warn!(
                    order_id = %self.id,
                    product_id = %item.product_id,
                    ?direction,
                    error = %e,
                    "Stock move failed, compensating"
                );
                for earlier in self.items[..done].iter().rev() {
                    if let Err(undo) = direction
                        .undo()
                        .apply(products, earlier.product_id, earlier.quantity)
                        .await
                    {
                        warn!(
                            product_id = %earlier.product_id,
                            error = %undo,
                            "Compensation failed"
                        );
                    }
                }
                return Err(product_failure(item.product_id, e));
            }
        }
        Ok(())
    }

    /// Checks each line against the catalog and copies the product snapshot onto it.
    async fn check_catalog(&mut self, products: &ProductClient) -> Result<(), OrderError> {
        for item in &mut self.items {
            let product = products
                .get_product(item.product_id)
                .await
                .map_err(|e| product_failure(item.product_id, e))?
                .filter(|p| !p.is_deleted())
                .ok_or_else(|| OrderError::ProductNotFound(item.product_id.to_string()))?;

            if !product.is_active {
                return Err(OrderError::ProductUnavailable(item.product_id.to_string()));
            }
            if product.stock < item.quantity {
                return Err(OrderError::InsufficientStock {
                    product_id: item.product_id.to_string(),
                    requested: item.quantity,
                    available: product.stock,
                });
            }

            item.product_name = product.title;
            item.product_sku = product.sku;
            item.product_image = product.image_url;
        }
        Ok(())
    }

    fn stamp(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        match status {
            OrderStatus::Shipped => self.shipped_at = Some(now),
            OrderStatus::Delivered => self.delivered_at = Some(now),
            OrderStatus::Canceled => self.canceled_at = Some(now),
            OrderStatus::Pending | OrderStatus::Processing => {}
        }
        self.status = status;
        self.updated_at = now;
    }
}

fn required(value: &str, field: &str) -> Result<(), OrderError> {
    if value.trim().is_empty() {
        return Err(OrderError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    /// Structural validation and pricing. Nothing outside the payload is consulted yet.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        required(&params.customer_name, "customer name")?;
        required(&params.customer_phone, "customer phone")?;

        let (lines, totals) = price_order(&params.items, params.discount, params.shipping)?;
        let items = params
            .items
            .iter()
            .zip(lines)
            .map(|(request, price)| OrderItem {
                product_id: request.product_id,
                // snapshot filled in on_create
                product_name: String::new(),
                product_sku: None,
                product_image: None,
                quantity: request.quantity,
                unit_price: price.unit_price,
                discount: price.discount,
                subtotal: price.subtotal,
                total: price.total,
            })
            .collect();

        Ok(Self {
            id,
            order_number: String::new(),
            status: OrderStatus::Pending,
            subtotal: totals.subtotal,
            discount: totals.discount,
            shipping: totals.shipping,
            total: totals.total,
            customer_name: params.customer_name,
            customer_phone: params.customer_phone,
            customer_email: params.customer_email,
            user_id: params.user_id,
            customer_id: params.customer_id,
            address_id: params.address_id,
            payment_method: params.payment_method,
            shipping_method: params.shipping_method,
            notes: params.notes,
            items,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
            shipped_at: None,
            delivered_at: None,
            canceled_at: None,
        })
    }

    fn unique_key(&self) -> Option<String> {
        (!self.order_number.is_empty()).then(|| self.order_number.clone())
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        self.check_catalog(&ctx.products).await?;
        self.move_stock(&ctx.products, StockMove::Reserve).await?;

        let now = ctx.clock.now();
        self.order_number = ctx.numbers.next(now);
        self.created_at = now;
        self.updated_at = now;
        info!(
            order_id = %self.id,
            order_number = %self.order_number,
            items = self.items.len(),
            total = %self.total,
            "Order accepted"
        );
        Ok(())
    }

    /// The order was refused after its stock was reserved; give the stock back.
    async fn on_discard(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        warn!(order_id = %self.id, order_number = %self.order_number, "Discarding order");
        self.move_stock(&ctx.products, StockMove::Release).await
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = ctx.clock.now();
        Ok(())
    }

    /// Removing an order that still holds stock hands the stock back first. If the ledger
    /// refuses, the order stays.
    async fn on_delete(&self, ctx: &OrderContext) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Ok(());
        }
        self.move_stock(&ctx.products, StockMove::Release).await?;
        info!(order_id = %self.id, status = %self.status, "Stock released for removed order");
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::SetStatus(next) => {
                if next == self.status {
                    debug!(order_id = %self.id, status = %next, "Status unchanged");
                    return Ok(self.clone());
                }
                if !self.status.can_transition_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                if next == OrderStatus::Canceled {
                    self.move_stock(&ctx.products, StockMove::Release).await?;
                }

                let from = self.status;
                self.stamp(next, ctx.clock.now());
                info!(order_id = %self.id, %from, to = %next, "Status changed");
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderLine;
    use rust_decimal::Decimal;

    fn money(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn empty_order_is_rejected_first() {
        let params = OrderCreate::new("", "", vec![]);
        assert_eq!(
            Order::from_create_params(OrderId(1), params).unwrap_err(),
            OrderError::EmptyOrder
        );
    }

    #[test]
    fn customer_phone_is_required() {
        let params = OrderCreate::new(
            "Ana",
            "  ",
            vec![OrderLine::new(ProductId(1), 1, money(1000))],
        );
        assert_eq!(
            Order::from_create_params(OrderId(1), params).unwrap_err(),
            OrderError::ValidationError("customer phone is required".into())
        );
    }

    #[test]
    fn zero_quantity_is_a_validation_error() {
        let params = OrderCreate::new(
            "Ana",
            "11999990000",
            vec![OrderLine::new(ProductId(1), 0, money(1000))],
        );
        assert!(matches!(
            Order::from_create_params(OrderId(1), params),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn new_order_is_priced_and_pending() {
        let mut params = OrderCreate::new(
            "Ana",
            "11999990000",
            vec![
                OrderLine::new(ProductId(1), 2, money(5000)),
                OrderLine::new(ProductId(2), 1, money(1990)),
            ],
        );
        params.discount = Some(money(1000));
        params.shipping = Some(money(1500));

        let order = Order::from_create_params(OrderId(1), params).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, money(11990));
        assert_eq!(order.total, money(12490));
        assert_eq!(order.items[0].subtotal, money(10000));
        assert!(order.order_number.is_empty());
        assert_eq!(order.unique_key(), None);
    }

    #[test]
    fn ledger_errors_carry_the_line_product() {
        assert_eq!(
            product_failure(
                ProductId(4),
                ProductError::InsufficientStock {
                    requested: 3,
                    available: 1
                }
            ),
            OrderError::InsufficientStock {
                product_id: "product_4".into(),
                requested: 3,
                available: 1
            }
        );
        assert_eq!(
            product_failure(ProductId(4), ProductError::NotFound("product_4".into())),
            OrderError::ProductNotFound("product_4".into())
        );
    }
}
