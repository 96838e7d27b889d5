mod products;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prodex_auth::{AuthError, TokenValidator};
use prodex_store::CatalogStore;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub validator: Arc<TokenValidator>,
    pub default_page_size: u32,
    /// Reported as `plugin_version` and sent to the oracle as `version`.
    pub plugin_version: String,
    /// Shop host used when a request carries no `Host` header.
    pub site_host: String,
}

/// Body of a refused request: the oracle's raw answer (empty on transport
/// failure) and its error.
#[derive(Debug, Serialize)]
struct GateFailure {
    response: String,
    error: serde_json::Value,
}

/// A request that did not pass the access gate.
#[derive(Debug)]
pub struct FeedError(pub AuthError);

impl From<AuthError> for FeedError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        match self.0 {
            AuthError::Rejected { body, error } => (
                StatusCode::UNAUTHORIZED,
                Json(GateFailure {
                    response: body,
                    error,
                }),
            )
                .into_response(),
            other => {
                tracing::error!(error = %other, "token validation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(GateFailure {
                        response: String::new(),
                        error: serde_json::Value::String(other.to_string()),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    products: usize,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/wcpe/v1/products", post(products::extract_products))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        products: state.store.info().product_count,
    })
}
