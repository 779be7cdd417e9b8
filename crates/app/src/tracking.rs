//! Order tracking.
//!
//! The single-order lifecycle view. Every lookup is a fresh read against
//! the order store (nothing is cached) and the view only refreshes on an
//! explicit request: a form submit, or the initial mount with a known id.
//!
//! Lookups are asynchronous and the user may navigate away before one
//! lands, so results carry a generation token: a response whose token is
//! no longer current is dropped instead of overwriting newer state.

use comptoir::estimates::estimated_prep_minutes;
use thiserror::Error;

use crate::{
    context::AppContext,
    domain::orders::{
        OrdersServiceError,
        models::{Order, OrderId},
    },
};

/// Failure talking to the order store. Malformed input is *not* in here;
/// it folds into the not-found outcome, indistinguishable from a genuine
/// miss.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("failed to look up the order")]
    Service(#[from] OrdersServiceError),
}

/// A tracked order plus the display estimate, recomputed on every read
/// from the same constants the receipt uses.
#[derive(Debug, Clone)]
pub struct TrackedOrder {
    pub order: Order,
    pub estimated_prep_minutes: u64,
}

impl TrackedOrder {
    fn new(order: Order) -> Self {
        let estimated_prep_minutes = estimated_prep_minutes(&order.items);

        Self {
            order,
            estimated_prep_minutes,
        }
    }
}

/// What a lookup produced.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// The order exists; here is its latest state.
    Found(Order),

    /// No such order: a normal outcome, also covering unparsable input.
    NotFound,
}

/// Token tying an in-flight lookup to the view state it may update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupToken {
    generation: u64,
}

/// Parses user input into an order id. Whitespace is tolerated; anything
/// non-numeric is `None`.
#[must_use]
pub fn parse_order_id(input: &str) -> Option<OrderId> {
    input.trim().parse().ok()
}

/// The tracking view state.
#[derive(Debug, Default)]
pub struct OrderTracker {
    generation: u64,
    current: Option<TrackedOrder>,
}

impl OrderTracker {
    /// An empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent lookup result still on display.
    #[must_use]
    pub fn current(&self) -> Option<&TrackedOrder> {
        self.current.as_ref()
    }

    /// Starts a lookup: newer lookups invalidate the tokens of older
    /// ones, so a slow response cannot clobber a fresher result.
    pub fn begin(&mut self) -> LookupToken {
        self.generation = self.generation.saturating_add(1);
        self.current = None;

        LookupToken {
            generation: self.generation,
        }
    }

    /// Whether `token` still belongs to the latest lookup.
    #[must_use]
    pub fn is_current(&self, token: LookupToken) -> bool {
        self.generation == token.generation
    }

    /// Applies a lookup result. Returns `false`, leaving the view
    /// untouched, when the token is stale, i.e. the response arrived
    /// after the user moved on.
    pub fn apply(&mut self, token: LookupToken, outcome: LookupOutcome) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.current = match outcome {
            LookupOutcome::Found(order) => Some(TrackedOrder::new(order)),
            LookupOutcome::NotFound => None,
        };

        true
    }

    /// Convenience driver: parse, fetch fresh, apply. Malformed input
    /// short-circuits to not-found without touching the store.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackingError`] when the store call fails; the view is
    /// cleared so no stale order lingers behind an error message.
    pub async fn lookup(
        &mut self,
        ctx: &AppContext,
        input: &str,
    ) -> Result<Option<&TrackedOrder>, TrackingError> {
        let token = self.begin();

        let Some(id) = parse_order_id(input) else {
            self.apply(token, LookupOutcome::NotFound);

            return Ok(None);
        };

        let outcome = match ctx.orders.fetch_order(id).await? {
            Some(order) => LookupOutcome::Found(order),
            None => LookupOutcome::NotFound,
        };

        self.apply(token, outcome);

        Ok(self.current())
    }
}
