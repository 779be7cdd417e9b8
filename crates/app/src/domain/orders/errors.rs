//! Orders service errors.

use thiserror::Error;

use crate::rest::RestError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order store unavailable")]
    Unavailable(#[source] RestError),

    #[error("order store rejected the request")]
    Rejected(#[source] RestError),
}

impl From<RestError> for OrdersServiceError {
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
