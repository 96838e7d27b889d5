use thiserror::Error;

/// Reasons a request fails the access gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured oracle endpoint is not a valid URL.
    #[error("invalid validation endpoint: {0}")]
    InvalidEndpoint(String),

    /// Network, TLS or timeout failure talking to the oracle.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The oracle answered with a body that is not JSON.
    #[error("malformed validation response: {source}")]
    Malformed {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The oracle did not accept the token.
    #[error("token rejected")]
    Rejected {
        /// Oracle response body as received.
        body: String,
        /// The oracle's `error` field, `null` when absent.
        error: serde_json::Value,
    },
}
