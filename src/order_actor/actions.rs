use crate::model::OrderStatus;

/// Custom actions for Order entities. Each returns the order as it stands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    /// Move to `OrderStatus`. Requesting the current status is a no-op; moving to
    /// CANCELED first returns every line's stock and sales to the ledger.
    SetStatus(OrderStatus),
}
