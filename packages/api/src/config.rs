//! # Client configuration
//!
//! ```toml
//! base_url = "https://mercado.example.com"
//! timeout_secs = 30
//! page_size = 20
//! ```
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! client pointed at `http://localhost:8080`.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `MERCADO_API_URL` | `base_url` |
//! | `MERCADO_API_TIMEOUT_SECS` | `timeout_secs` |
//! | `MERCADO_PAGE_SIZE` | `page_size` |
//!
//! Native builds read the variables at runtime (a `.env` file is honoured
//! through `dotenvy`). In the browser there is no process environment, so the
//! values are captured when the wasm bundle is compiled.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

const ENV_BASE_URL: &str = "MERCADO_API_URL";
const ENV_TIMEOUT: &str = "MERCADO_API_TIMEOUT_SECS";
const ENV_PAGE_SIZE: &str = "MERCADO_PAGE_SIZE";

/// Where and how the client talks to the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Ignored in the browser, where fetch has none.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Rows requested per page in admin tables.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the page size.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Build the configuration from environment variables, keeping defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            Self::from_lookup(|key| std::env::var(key).ok())
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_lookup(|key| {
                match key {
                    ENV_BASE_URL => option_env!("MERCADO_API_URL"),
                    ENV_TIMEOUT => option_env!("MERCADO_API_TIMEOUT_SECS"),
                    ENV_PAGE_SIZE => option_env!("MERCADO_PAGE_SIZE"),
                    _ => None,
                }
                .map(str::to_string)
            })
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup(ENV_TIMEOUT).and_then(|v| v.trim().parse().ok()) {
            config.timeout_secs = secs;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|s| *s > 0)
        {
            config.page_size = size;
        }
        config
    }

    /// Parsed base URL. A trailing slash is added so relative joins keep any
    /// path prefix (`https://host/mercado/` + `api/v1/stands`).
    pub fn base_url(&self) -> Result<Url, ApiError> {
        let raw = self.base_url.trim();
        let with_slash = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let url = Url::parse(&with_slash)
            .map_err(|e| ApiError::Config(format!("invalid base URL {raw:?}: {e}")))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL must be http(s): {raw:?}"
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = ApiConfig::from_toml("").unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ApiConfig::new("https://mercado.example.com").with_page_size(50);
        let text = config.to_toml().unwrap();
        assert_eq!(ApiConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_lookup_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, " https://api.mercado.pe "),
            (ENV_TIMEOUT, "not-a-number"),
            (ENV_PAGE_SIZE, "0"),
        ]
        .into_iter()
        .collect();
        let config = ApiConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "https://api.mercado.pe");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let url = ApiConfig::new("https://host/mercado").base_url().unwrap();
        assert_eq!(
            url.join("api/v1/stands").unwrap().as_str(),
            "https://host/mercado/api/v1/stands"
        );
    }

    #[test]
    fn test_base_url_rejects_non_http() {
        assert!(matches!(
            ApiConfig::new("ftp://host").base_url(),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ApiConfig::new("not a url").base_url(),
            Err(ApiError::Config(_))
        ));
    }
}
