use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_AUTH_ENDPOINT: &str = "https://extractor.torob.com/validate_token/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let site_url = require("PRODEX_SITE_URL")?;
    let parsed = reqwest::Url::parse(site_url.trim())
        .map_err(|e| invalid("PRODEX_SITE_URL", format!("{site_url:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(
            "PRODEX_SITE_URL",
            format!("expected an http(s) URL, got {site_url:?}"),
        ));
    }
    let site_host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| invalid("PRODEX_SITE_URL", format!("{site_url:?} has no host")))?;

    let env = parse_environment(&or_default("PRODEX_ENV", "development"))?;

    let bind_addr = or_default("PRODEX_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRODEX_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PRODEX_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("PRODEX_CATALOG_PATH", "./config/catalog.yaml"));
    let auth_endpoint = or_default("PRODEX_AUTH_ENDPOINT", DEFAULT_AUTH_ENDPOINT);

    let auth_timeout_secs = or_default("PRODEX_AUTH_TIMEOUT_SECS", "12")
        .parse::<u64>()
        .map_err(|e| invalid("PRODEX_AUTH_TIMEOUT_SECS", e.to_string()))?;

    let default_page_size = or_default("PRODEX_DEFAULT_PAGE_SIZE", "10")
        .parse::<u32>()
        .map_err(|e| invalid("PRODEX_DEFAULT_PAGE_SIZE", e.to_string()))?;
    if default_page_size == 0 {
        return Err(invalid(
            "PRODEX_DEFAULT_PAGE_SIZE",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_url,
        site_host,
        catalog_path,
        auth_endpoint,
        auth_timeout_secs,
        default_page_size,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRODEX_ENV".to_string(),
            reason: format!("unknown environment {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
