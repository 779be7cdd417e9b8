//! Order lifecycle
//!
//! Orders are created once at checkout and owned by the hosted store; the
//! client only re-reads them and, on the admin side, pushes status
//! transitions. The status machine is fixed: a forward sequence with a
//! cancellation side branch, and two terminal states.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::LineItem;

/// Where an order sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted, not started.
    Pending,

    /// In the kitchen.
    Preparing,

    /// Ready for pickup or delivery.
    Ready,

    /// Handed over. Terminal.
    Delivered,

    /// Cancelled by an administrator. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// The required forward sequence, cancellation excluded.
    pub const FORWARD_SEQUENCE: [Self; 4] =
        [Self::Pending, Self::Preparing, Self::Ready, Self::Delivered];

    /// Position within the forward sequence; `None` for `Cancelled`.
    fn forward_position(self) -> Option<usize> {
        Self::FORWARD_SEQUENCE.iter().position(|status| *status == self)
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether an administrator may move an order from `self` to `next`.
    ///
    /// Terminal states admit nothing (the check is idempotent-safe: asking
    /// twice changes nothing). `Cancelled` is reachable from any
    /// non-terminal state. Otherwise movement is forward-only along the
    /// sequence: skipping ahead is allowed, going back is not.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }

        if next == Self::Cancelled {
            return true;
        }

        match (self.forward_position(), next.forward_position()) {
            (Some(current), Some(target)) => target > current,
            _ => false,
        }
    }

    /// Lowercase wire/display name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card at checkout.
    Card,

    /// Cash on pickup or delivery.
    Cash,
}

impl PaymentMethod {
    /// Lowercase wire/display name of the payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Order total in minor units: charged price times quantity, summed.
///
/// The client computes the total it submits at checkout; the store echoes
/// it back on every read.
#[must_use]
pub fn order_total_minor(items: &[LineItem]) -> u64 {
    items
        .iter()
        .fold(0, |sum, line| sum.saturating_add(line.line_total_minor()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn terminal_states_never_transition_further() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            for next in [
                OrderStatus::Pending,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(
                    !terminal.can_transition_to(next),
                    "{terminal} must not move to {next}"
                );
            }
        }
    }

    #[test]
    fn forward_moves_are_allowed_including_skips() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Delivered));
        assert!(
            OrderStatus::Pending.can_transition_to(OrderStatus::Ready),
            "the kitchen may skip ahead"
        );
    }

    #[test]
    fn backward_moves_are_rejected() {
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Preparing));
    }

    #[test]
    fn cancellation_is_reachable_from_any_non_terminal_state() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert!(
                status.can_transition_to(OrderStatus::Cancelled),
                "{status} must allow cancellation"
            );
        }
    }

    #[test]
    fn status_round_trips_through_wire_names() -> TestResult {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
            assert_eq!(
                serde_json::to_string(&status)?,
                format!("\"{status}\""),
            );
        }

        Ok(())
    }
}
