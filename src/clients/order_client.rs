use crate::framework::{ActorClient, ResourceClient};
use crate::impl_resource_client;
use crate::model::{
    Order, OrderCreate, OrderFilter, OrderId, OrderStatus, OrderUpdate, Page, StatusChange,
};
use crate::order_actor::{OrderAction, OrderError};
use tracing::{debug, info, instrument};

/// Client for the Order actor.
///
/// Orchestration (catalog checks, stock reservation, numbering) happens inside the
/// Order actor's `on_create` hook; this side only shapes requests and results.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_resource_client!(
    OrderClient,
    Order,
    OrderError,
    order,
    OrderError::from_framework
);

impl OrderClient {
    /// Places an order and returns it as stored, order number included.
    #[instrument(skip(self, params), fields(items = params.items.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");
        let id = self
            .inner
            .create(params)
            .await
            .map_err(OrderError::from_framework)?;
        let order = self
            .get_order(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        info!(%id, order_number = %order.order_number, "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, OrderAction::SetStatus(status))
            .await
            .map_err(OrderError::from_framework)
    }

    /// Like [`update_status`](Self::update_status), for a status still in wire form.
    ///
    /// A missing order is reported before an unknown status string.
    #[instrument(skip(self))]
    pub async fn update_status_str(&self, id: OrderId, status: &str) -> Result<Order, OrderError> {
        match status.parse::<OrderStatus>() {
            Ok(status) => self.update_status(id, status).await,
            Err(e) => {
                if self.get_order(id).await?.is_none() {
                    return Err(OrderError::NotFound(id.to_string()));
                }
                Err(e.into())
            }
        }
    }

    /// Applies a decoded `PATCH /orders/:id/status` body.
    pub async fn change_status(
        &self,
        id: OrderId,
        change: StatusChange,
    ) -> Result<Order, OrderError> {
        self.update_status_str(id, &change.status).await
    }

    /// Cancels the order, returning its stock and sales to the ledger.
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.update_status(id, OrderStatus::Canceled).await
    }

    /// Edits the free-text notes. Status is not touched.
    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrderError> {
        self.inner
            .update(id, update)
            .await
            .map_err(OrderError::from_framework)
    }

    /// Newest first, optionally restricted to one status.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: OrderFilter) -> Result<Page<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|order| filter.status.map_or(true, |status| order.status == status))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Page::slice(orders, filter.page, filter.per_page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_get};
    use crate::framework::FrameworkError;
    use crate::framework::ResourceRequest;

    #[tokio::test]
    async fn unknown_status_is_rejected_after_existence_check() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let task =
            tokio::spawn(async move { orders.update_status_str(OrderId(2), "LOST").await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, OrderId(2));
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(OrderError::NotFound("order_2".into()))
        );
    }

    #[tokio::test]
    async fn known_status_goes_straight_to_the_actor() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let task =
            tokio::spawn(async move { orders.update_status_str(OrderId(5), "SHIPPED").await });

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, OrderId(5));
        assert_eq!(action, OrderAction::SetStatus(OrderStatus::Shipped));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                OrderError::InvalidTransition {
                    from: OrderStatus::Delivered,
                    to: OrderStatus::Shipped,
                },
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Shipped,
            })
        );
    }

    #[tokio::test]
    async fn create_conflict_surfaces_as_conflict() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let task = tokio::spawn(async move {
            orders
                .create_order(OrderCreate::new("Ana", "11999990000", vec![]))
                .await
        });

        match receiver.recv().await {
            Some(ResourceRequest::Create { respond_to, .. }) => {
                respond_to
                    .send(Err(FrameworkError::Conflict("2503070001".into())))
                    .unwrap();
            }
            _ => panic!("Expected Create request"),
        }

        assert_eq!(
            task.await.unwrap(),
            Err(OrderError::Conflict("2503070001".into()))
        );
    }
}
