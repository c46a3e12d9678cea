//! Order pricing: from requested lines plus order-level discount and shipping to the
//! four stored money fields.
//!
//! The order subtotal sums line subtotals *before* line discounts. Line discounts only
//! reduce the stored per-line total; they do not roll up into the order subtotal or total.
//! No rounding is applied; callers keep a consistent scale (2 places).

use crate::model::OrderLine;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("quantity must be a positive integer (line {line})")]
    InvalidQuantity { line: usize },
    #[error("unit price must be positive (line {line})")]
    InvalidUnitPrice { line: usize },
    #[error("line discount must not be negative (line {line})")]
    NegativeLineDiscount { line: usize },
    #[error("order discount must not be negative")]
    NegativeDiscount,
    #[error("shipping must not be negative")]
    NegativeShipping,
}

/// Money fields of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePrice {
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
}

/// Money fields of the order. `total == subtotal - discount + shipping` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Prices a single line. `line` is only used to label errors.
pub fn price_line(line: usize, request: &OrderLine) -> Result<LinePrice, PricingError> {
    if request.quantity == 0 {
        return Err(PricingError::InvalidQuantity { line });
    }
    if request.unit_price <= Decimal::ZERO {
        return Err(PricingError::InvalidUnitPrice { line });
    }
    let discount = request.discount.unwrap_or(Decimal::ZERO);
    if discount < Decimal::ZERO {
        return Err(PricingError::NegativeLineDiscount { line });
    }

    let subtotal = Decimal::from(request.quantity) * request.unit_price;
    Ok(LinePrice {
        unit_price: request.unit_price,
        discount,
        subtotal,
        total: subtotal - discount,
    })
}

/// Prices every line, then the order. Absent discount and shipping count as zero.
pub fn price_order(
    lines: &[OrderLine],
    discount: Option<Decimal>,
    shipping: Option<Decimal>,
) -> Result<(Vec<LinePrice>, OrderTotals), PricingError> {
    let discount = discount.unwrap_or(Decimal::ZERO);
    let shipping = shipping.unwrap_or(Decimal::ZERO);
    if discount < Decimal::ZERO {
        return Err(PricingError::NegativeDiscount);
    }
    if shipping < Decimal::ZERO {
        return Err(PricingError::NegativeShipping);
    }

    let priced = lines
        .iter()
        .enumerate()
        .map(|(line, request)| price_line(line, request))
        .collect::<Result<Vec<_>, _>>()?;

    let subtotal: Decimal = priced.iter().map(|line| line.subtotal).sum();
    let totals = OrderTotals {
        subtotal,
        discount,
        shipping,
        total: subtotal - discount + shipping,
    };
    Ok((priced, totals))
}
