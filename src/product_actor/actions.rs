//! Stock ledger actions for the Product actor.
//!
//! These are the only operations that change `stock` and `sales_count`. The two counters
//! are adjusted by separate actions; keeping them in lockstep is the caller's job
//! (see [`ProductClient::reserve`](crate::clients::ProductClient::reserve) and
//! [`ProductClient::release`](crate::clients::ProductClient::release)).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// `stock += delta`. A negative delta that would take stock below zero fails with
    /// `InsufficientStock` and changes nothing.
    AdjustStock(i64),
    /// `sales_count += delta`. No lower bound.
    AdjustSalesCount(i64),
    /// Stamps `deleted_at`. A second call keeps the first timestamp.
    SoftDelete,
}

/// Results from [`ProductAction`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductActionResult {
    /// Stock level after the action (`CheckStock`, `AdjustStock`).
    Stock(u32),
    /// Sales count after the action (`AdjustSalesCount`).
    SalesCount(i64),
    /// `SoftDelete` done.
    Deleted,
}
