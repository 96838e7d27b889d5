use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Public base URL of the shop, e.g. `https://www.shop.example`.
    pub site_url: String,
    /// Host of `site_url`, without userinfo, port, path or query.
    pub site_host: String,
    pub catalog_path: PathBuf,
    pub auth_endpoint: String,
    pub auth_timeout_secs: u64,
    /// Page size used when a request asks for `limit < 1`.
    pub default_page_size: u32,
}
