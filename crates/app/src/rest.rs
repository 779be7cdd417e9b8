//! Hosted store client.
//!
//! The storefront's catalog, promotions and orders live in a hosted
//! PostgREST-style backend. This is the one place that knows the wire
//! conventions: table endpoints under `/rest/v1`, the `apikey` header
//! pair, `Prefer: return=representation` echoes, and the two error codes
//! the storefront treats specially: `42P01` (backing table missing, a
//! non-fatal condition for optional tables) and `PGRST116` (zero rows for
//! a single-object request, i.e. not found).

use reqwest::{Client, RequestBuilder, StatusCode, header::ACCEPT};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Postgres "relation does not exist".
const UNDEFINED_TABLE: &str = "42P01";

/// PostgREST "the result contains 0 rows".
const NO_ROWS: &str = "PGRST116";

/// Media type that asks PostgREST for exactly one object.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Errors surfaced by the hosted store boundary.
#[derive(Debug, Error)]
pub enum RestError {
    /// The request never completed (DNS, connect, timeout).
    #[error("could not reach the hosted store")]
    Transport(#[source] reqwest::Error),

    /// The store answered with a server-side failure.
    #[error("hosted store unavailable (status {status})")]
    Unavailable {
        /// HTTP status returned by the store.
        status: u16,
    },

    /// A single-object request matched no rows.
    #[error("no rows matched the request")]
    NoRows,

    /// The backing table has not been provisioned.
    #[error("backing table is missing")]
    MissingTable,

    /// The store rejected the request for any other reason.
    #[error("hosted store rejected the request ({code}): {message}")]
    Backend {
        /// Store-reported error code.
        code: String,

        /// Store-reported message.
        message: String,
    },

    /// A 2xx response body did not decode as the expected shape.
    #[error("could not decode the hosted store response")]
    InvalidResponse(#[source] reqwest::Error),
}

/// Error body shape returned by the store.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) code: Option<String>,
    pub(crate) message: Option<String>,
}

/// Maps a non-success response onto the error taxonomy.
fn map_error(status: StatusCode, body: Option<ErrorBody>) -> RestError {
    if status.is_server_error() {
        return RestError::Unavailable {
            status: status.as_u16(),
        };
    }

    let Some(body) = body else {
        return RestError::Unavailable {
            status: status.as_u16(),
        };
    };

    match body.code.as_deref() {
        Some(UNDEFINED_TABLE) => RestError::MissingTable,
        Some(NO_ROWS) => RestError::NoRows,
        Some(code) => RestError::Backend {
            code: code.to_string(),
            message: body.message.unwrap_or_default(),
        },
        None => RestError::Backend {
            code: "unknown".to_string(),
            message: body.message.unwrap_or_default(),
        },
    }
}

/// Client for one hosted store project.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    /// Creates a client for the store at `base_url`, authenticating every
    /// request with `api_key`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();

        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}?{query}", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn run(&self, builder: RequestBuilder) -> Result<reqwest::Response, RestError> {
        let response = self
            .authed(builder)
            .send()
            .await
            .map_err(RestError::Transport)?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorBody>().await.ok();

        Err(map_error(status, body))
    }

    async fn run_decoding<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, RestError> {
        self.run(builder)
            .await?
            .json()
            .await
            .map_err(RestError::InvalidResponse)
    }

    /// Fetches all rows matched by `query` from `table`.
    ///
    /// # Errors
    ///
    /// Returns a [`RestError`] when the request fails, including
    /// [`RestError::MissingTable`] when the table is not provisioned;
    /// callers with optional tables fold that into an empty result.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, RestError> {
        self.run_decoding(self.http.get(self.table_url(table, query)))
            .await
    }

    /// Fetches exactly one row; [`RestError::NoRows`] when none matches.
    ///
    /// # Errors
    ///
    /// Returns a [`RestError`] when the request fails or matches no rows.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<T, RestError> {
        self.run_decoding(
            self.http
                .get(self.table_url(table, query))
                .header(ACCEPT, SINGLE_OBJECT),
        )
        .await
    }

    /// Inserts one row and returns the stored representation (with the
    /// store-assigned columns filled in).
    ///
    /// # Errors
    ///
    /// Returns a [`RestError`] when the request fails.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T, RestError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.run_decoding(
            self.http
                .post(self.table_url(table, "select=*"))
                .header("Prefer", "return=representation")
                .header(ACCEPT, SINGLE_OBJECT)
                .json(body),
        )
        .await
    }

    /// Patches the rows matched by `filter` and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns a [`RestError`] when the request fails;
    /// [`RestError::NoRows`] when the filter matches nothing.
    pub async fn update<B, T>(&self, table: &str, filter: &str, body: &B) -> Result<T, RestError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.run_decoding(
            self.http
                .patch(self.table_url(table, &format!("{filter}&select=*")))
                .header("Prefer", "return=representation")
                .header(ACCEPT, SINGLE_OBJECT)
                .json(body),
        )
        .await
    }

    /// Deletes the rows matched by `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`RestError`] when the request fails. Matching no rows is
    /// not an error; deletion is idempotent.
    pub async fn delete(&self, table: &str, filter: &str) -> Result<(), RestError> {
        self.run(self.http.delete(self.table_url(table, filter)))
            .await
            .map(|_| ())
    }
}
