use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Order status with an explicit transition table.
///
/// ```text
/// PENDING -> PROCESSING -> SHIPPED -> DELIVERED
///    \___________\____________\_____> CANCELED
/// ```
///
/// Forward moves may skip states. DELIVERED and CANCELED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }

    /// Position along the fulfilment chain; `None` for CANCELED.
    fn rank(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Processing => Some(1),
            OrderStatus::Shipped => Some(2),
            OrderStatus::Delivered => Some(3),
            OrderStatus::Canceled => None,
        }
    }

    /// Whether `self -> next` is an edge of the table. Staying put is not an edge.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, _) => false,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised for a status string outside the five known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;
    use super::*;

    #[test]
    fn forward_moves_are_allowed() {
        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Shipped));
        assert!(Processing.can_transition_to(Delivered));
        assert!(Shipped.can_transition_to(Delivered));
    }

    #[test]
    fn backward_and_self_moves_are_rejected() {
        assert!(!Processing.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn cancel_is_reachable_from_every_open_state() {
        for from in [Pending, Processing, Shipped] {
            assert!(from.can_transition_to(Canceled), "{from} -> CANCELED");
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for to in OrderStatus::ALL {
            assert!(!Delivered.can_transition_to(to));
            assert!(!Canceled.can_transition_to(to));
        }
    }

    #[test]
    fn parses_wire_names_only() {
        assert_eq!("SHIPPED".parse::<OrderStatus>(), Ok(Shipped));
        assert_eq!(
            "shipped".parse::<OrderStatus>(),
            Err(UnknownStatus("shipped".into()))
        );
        assert!("REFUNDED".parse::<OrderStatus>().is_err());
    }
}
