mod api;
mod middleware;

use std::sync::Arc;

use prodex_auth::TokenValidator;
use prodex_store::{load_snapshot, InMemoryCatalog};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = prodex_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let snapshot = load_snapshot(&config.catalog_path)?;
    let store = InMemoryCatalog::new(snapshot, &config.site_url);

    let plugin_version = env!("CARGO_PKG_VERSION").to_owned();
    let validator = TokenValidator::new(
        &config.auth_endpoint,
        config.auth_timeout_secs,
        &plugin_version,
    )?;

    let app = build_app(AppState {
        store: Arc::new(store),
        validator: Arc::new(validator),
        default_page_size: config.default_page_size,
        plugin_version,
        site_host: config.site_host.clone(),
    });

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        catalog = %config.catalog_path.display(),
        "starting prodex-server"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
