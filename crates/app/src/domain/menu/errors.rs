//! Menu service errors.

use thiserror::Error;

use crate::rest::RestError;

#[derive(Debug, Error)]
pub enum MenuServiceError {
    #[error("menu item not found")]
    NotFound,

    #[error("menu store unavailable")]
    Unavailable(#[source] RestError),

    #[error("menu store rejected the request")]
    Rejected(#[source] RestError),
}

impl From<RestError> for MenuServiceError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rows_becomes_not_found() {
        let error = MenuServiceError::from(RestError::NoRows);

        assert!(matches!(error, MenuServiceError::NotFound));
    }

    #[test]
    fn store_outage_becomes_unavailable() {
        let error = MenuServiceError::from(RestError::Unavailable { status: 503 });

        assert!(matches!(error, MenuServiceError::Unavailable(_)));
    }
}
