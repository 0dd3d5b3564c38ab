//! Settings structures for the SauceNAO client

use crate::error::{Error, Result};
use crate::search::DbMask;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default SauceNAO service
pub const DEFAULT_SERVICE: &str = "https://saucenao.com";

/// Main settings structure, usually loaded from `saucenao.yml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Service base URL, without the trailing `/search.php`
    pub service: String,
    /// API key sent with every search
    pub api_key: String,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            api_key: String::new(),
            search: SearchSettings::default(),
            outgoing: OutgoingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Merge with environment variables (SAUCENAO_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SAUCENAO_API_KEY") {
            self.api_key = val;
        }
        if let Ok(val) = std::env::var("SAUCENAO_SERVICE") {
            self.service = val;
        }
        if let Ok(val) = std::env::var("SAUCENAO_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
    }

    /// Service URL with any trailing slash removed
    pub fn service_url(&self) -> &str {
        self.service.trim_end_matches('/')
    }
}

/// Defaults applied to searches built from settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Number of results to request
    pub num_results: u32,
    /// Limit matches to one per index
    pub test_mode: bool,
    /// Indexes to search (0 = all)
    pub db_mask: DbMask,
    /// Indexes to skip
    pub db_mask_exclude: DbMask,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            num_results: 16,
            test_mode: false,
            db_mask: DbMask::NONE,
            db_mask_exclude: DbMask::NONE,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// User agent sent with requests
    pub user_agent: String,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            pool_maxsize: 4,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            user_agent: format!("saucenao-rs/{}", crate::VERSION),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.service, "https://saucenao.com");
        assert_eq!(settings.search.num_results, 16);
        assert!(settings.search.db_mask.is_empty());
        assert!(settings.outgoing.verify_ssl);
    }

    #[test]
    fn test_partial_yaml() {
        let settings = Settings::from_yaml(
            "api_key: abc123\nsearch:\n  db_mask: 512\n  test_mode: true\noutgoing:\n  request_timeout: 2.5\n",
        )
        .unwrap();

        assert_eq!(settings.api_key, "abc123");
        assert_eq!(settings.service, DEFAULT_SERVICE);
        assert_eq!(settings.search.db_mask, DbMask::DANBOORU);
        assert!(settings.search.test_mode);
        assert_eq!(settings.search.num_results, 16);
        assert_eq!(settings.outgoing.request_timeout, 2.5);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Settings::from_yaml("search: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_service_url_trims_slash() {
        let settings = Settings {
            service: "https://example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.service_url(), "https://example.com");
    }
}
