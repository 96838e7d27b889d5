//! Client for the aggregator's token-validation oracle.
//!
//! Every extraction request is gated by one POST to the oracle carrying the
//! caller's token, the shop domain and the service version. Only a JSON body
//! with `success: true` and the exact acceptance message lets the request
//! through; the HTTP status of the oracle response is not consulted.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::AuthError;

const ACCEPTED_MESSAGE: &str = "the token is valid";

/// Validates caller tokens against the remote oracle.
///
/// Holds no per-token state; every call performs exactly one round-trip.
pub struct TokenValidator {
    client: Client,
    endpoint: Url,
    version: String,
}

impl TokenValidator {
    /// Creates a validator posting to `endpoint` with the given timeout.
    /// Redirects are never followed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`AuthError::InvalidEndpoint`] if `endpoint` does not parse.
    pub fn new(endpoint: &str, timeout_secs: u64, version: &str) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(Policy::none())
            .user_agent(concat!("prodex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let endpoint = Url::parse(endpoint)
            .map_err(|e| AuthError::InvalidEndpoint(format!("'{endpoint}': {e}")))?;

        Ok(Self {
            client,
            endpoint,
            version: version.to_owned(),
        })
    }

    /// Asks the oracle whether `token` may read the catalog of `shop_domain`.
    ///
    /// `authorization` is the caller's inbound authorization header, forwarded
    /// verbatim.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Http`] on transport failure or timeout.
    /// - [`AuthError::Malformed`] if the oracle body is not JSON.
    /// - [`AuthError::Rejected`] if the oracle did not accept the token.
    pub async fn authorize(
        &self,
        token: &str,
        shop_domain: &str,
        authorization: Option<&str>,
    ) -> Result<(), AuthError> {
        let form = [
            ("token", token),
            ("shop_domain", shop_domain),
            ("version", self.version.as_str()),
        ];
        let mut request = self.client.post(self.endpoint.clone()).form(&form);
        if let Some(header) = authorization {
            request = request.header(AUTHORIZATION, header);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, shop_domain, "token validation response received");

        let parsed: Value = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(source) => return Err(AuthError::Malformed { body, source }),
        };

        if is_accepted(&parsed) {
            Ok(())
        } else {
            let error = parsed.get("error").cloned().unwrap_or(Value::Null);
            tracing::debug!(shop_domain, "token rejected by validation oracle");
            Err(AuthError::Rejected { body, error })
        }
    }
}

fn is_accepted(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(true)
        && body.get("message").and_then(Value::as_str) == Some(ACCEPTED_MESSAGE)
}

/// Shop domain reported to the oracle: the host of the request's `Host`
/// authority, or `fallback` when the request carries none or it does not
/// parse. A leading `www.` is dropped.
#[must_use]
pub fn shop_domain(host: Option<&str>, fallback: &str) -> String {
    let host = host
        .and_then(authority_host)
        .or_else(|| authority_host(fallback))
        .unwrap_or_else(|| fallback.trim().to_ascii_lowercase());
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_owned(),
        None => host,
    }
}

/// Lowercased host of an HTTP authority (`host[:port]`), with userinfo and
/// port removed.
fn authority_host(authority: &str) -> Option<String> {
    let authority = authority.trim();
    if authority.is_empty() {
        return None;
    }
    Url::parse(&format!("http://{authority}"))
        .ok()?
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
}
