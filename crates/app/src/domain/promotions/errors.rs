//! Promotions service errors.

use thiserror::Error;

use crate::rest::RestError;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion not found")]
    NotFound,

    #[error("discount percentage must be between 1 and 100, got {got}")]
    InvalidDiscount { got: u8 },

    #[error("promotions store unavailable")]
    Unavailable(#[source] RestError),

    #[error("promotions store rejected the request")]
    Rejected(#[source] RestError),
}

impl From<RestError> for PromotionsServiceError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::NoRows => Self::NotFound,
            error @ (RestError::Transport(_) | RestError::Unavailable { .. }) => {
                Self::Unavailable(error)
            }
            error => Self::Rejected(error),
        }
    }
}
