//! Where the backend lives. The base URL is the only setting; it has a fixed
//! default and a single environment override.

pub const API_URL_VAR: &str = "FITNESS_ADMIN_API_URL";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "fitnessAdmin=info";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:9090/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Config::default();
        match std::env::var(API_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => config.api.base_url = url.trim().to_string(),
            _ => {}
        }
        config
    }
}
