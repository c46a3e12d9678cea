use crate::framework::ResourceClient;
use crate::impl_resource_client;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use tracing::{debug, instrument, warn};

/// Client for the Product actor, i.e. the stock ledger.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_resource_client!(
    ProductClient,
    Product,
    ProductError,
    product,
    ProductError::from_framework
);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map_err(ProductError::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(ProductError::from_framework)
    }

    async fn act(
        &self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<ProductActionResult, ProductError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(ProductError::from_framework)
    }

    /// Current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        match self.act(id, ProductAction::CheckStock).await? {
            ProductActionResult::Stock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// `stock += delta`; returns the new level. Fails without effect if stock would go negative.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: ProductId, delta: i64) -> Result<u32, ProductError> {
        match self.act(id, ProductAction::AdjustStock(delta)).await? {
            ProductActionResult::Stock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// `sales_count += delta`; returns the new count.
    #[instrument(skip(self))]
    pub async fn adjust_sales_count(&self, id: ProductId, delta: i64) -> Result<i64, ProductError> {
        match self.act(id, ProductAction::AdjustSalesCount(delta)).await? {
            ProductActionResult::SalesCount(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` out of stock and credits it to sales. Returns the stock left.
    ///
    /// Sales are only credited once the stock decrement has succeeded.
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        let stock = self.adjust_stock(id, -i64::from(quantity)).await?;
        if let Err(e) = self.adjust_sales_count(id, i64::from(quantity)).await {
            warn!(
                product_id = %id,
                quantity,
                error = %e,
                "Stock taken but sales count not credited"
            );
            return Err(e);
        }
        Ok(stock)
    }

    /// Puts `quantity` back into stock and removes it from sales. Returns the new stock.
    #[instrument(skip(self))]
    pub async fn release(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        let stock = self.adjust_stock(id, i64::from(quantity)).await?;
        if let Err(e) = self.adjust_sales_count(id, -i64::from(quantity)).await {
            warn!(
                product_id = %id,
                quantity,
                error = %e,
                "Stock returned but sales count not debited"
            );
            return Err(e);
        }
        Ok(stock)
    }

    /// Marks the product deleted. It stays readable for order history but cannot be ordered.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: ProductId) -> Result<(), ProductError> {
        match self.act(id, ProductAction::SoftDelete).await? {
            ProductActionResult::Deleted => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};
    use crate::framework::FrameworkError;

    #[tokio::test]
    async fn check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);
        responder.send(Ok(ProductActionResult::Stock(42))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(42));
    }

    #[tokio::test]
    async fn reserve_decrements_then_credits_sales() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.reserve(ProductId(7), 3).await });

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(action, ProductAction::AdjustStock(-3));
        responder.send(Ok(ProductActionResult::Stock(5))).unwrap();

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(action, ProductAction::AdjustSalesCount(3));
        responder.send(Ok(ProductActionResult::SalesCount(3))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(5));
    }

    #[tokio::test]
    async fn reserve_surfaces_typed_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.reserve(ProductId(7), 100).await });

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(action, ProductAction::AdjustStock(-100));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 4,
                },
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::InsufficientStock {
                requested: 100,
                available: 4
            })
        );
        // no sales-count message follows a failed decrement
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn missing_product_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.check_stock(ProductId(9)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::NotFound("product_9".into())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound("product_9".into()))
        );
    }
}
