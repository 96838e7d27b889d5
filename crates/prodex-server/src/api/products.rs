use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderMap},
    Extension, Form, Json,
};
use prodex_extract::{metadata, Envelope, ExtractRequest, Extractor, RawParams};

use crate::middleware::RequestId;

use super::{AppState, FeedError};

const X_AUTHORIZATION: &str = "x-authorization";

/// `X-Authorization` when present and non-empty, `Authorization` otherwise.
fn caller_authorization(headers: &HeaderMap) -> Option<&str> {
    [X_AUTHORIZATION, header::AUTHORIZATION.as_str()]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .find(|value| !value.trim().is_empty())
}

/// Gated extraction endpoint. Parameters come from the query string and a
/// form body; body values win.
pub(super) async fn extract_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    query: Result<Query<RawParams>, QueryRejection>,
    body: Result<Form<RawParams>, FormRejection>,
) -> Result<Json<Envelope>, FeedError> {
    let query = query.map(|Query(p)| p).unwrap_or_else(|err| {
        tracing::debug!(request_id = %req_id.0, error = %err, "ignoring unreadable query string");
        RawParams::default()
    });
    let body = body.map(|Form(p)| p).unwrap_or_else(|err| {
        tracing::debug!(request_id = %req_id.0, error = %err, "ignoring unreadable form body");
        RawParams::default()
    });
    let params = body.or(query);

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let shop_domain = prodex_auth::shop_domain(host, &state.site_host);
    let token = params.token.as_deref().map(str::trim).unwrap_or_default();

    if let Err(err) = state
        .validator
        .authorize(token, &shop_domain, caller_authorization(&headers))
        .await
    {
        tracing::warn!(request_id = %req_id.0, %shop_domain, error = %err, "extraction refused");
        return Err(err.into());
    }

    let request = ExtractRequest::from_params(&params, state.default_page_size);
    let extraction = Extractor::new(state.store.as_ref()).extract(&request);
    tracing::debug!(
        request_id = %req_id.0,
        emitted = extraction.products.len(),
        skipped = extraction.skipped,
        "extraction complete"
    );

    let metadata = metadata(&state.store.info(), &state.plugin_version);
    Ok(Json(extraction.into_envelope(metadata)))
}
