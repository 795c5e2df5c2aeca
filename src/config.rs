//! Client configuration
//!
//! Loaded from YAML or JSON and turned into an [`HttpTransport`] plus a
//! [`ResourceClient`].

use crate::client::{ResourceClient, DEFAULT_COLLECTION, DEFAULT_WORKER_THREADS};
use crate::error::{Error, Result, ResultExt};
use crate::pagination::PageLayout;
use crate::transport::{HttpTransport, HttpTransportConfig, RateLimiterConfig};
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service endpoint every request path is joined onto
    pub base_url: String,

    /// Collection path segment
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Sent as `api-version` on every non-cursor request
    #[serde(default)]
    pub api_version: Option<String>,

    /// Runtime worker threads backing blocking and async calls
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Where list responses keep their items and cursor
    #[serde(default)]
    pub page_layout: PageLayout,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_worker_threads() -> usize {
    DEFAULT_WORKER_THREADS
}

impl ClientConfig {
    /// Config with defaults for everything but the endpoint
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            collection: default_collection(),
            api_version: None,
            worker_threads: default_worker_threads(),
            http: HttpConfig::default(),
            page_layout: PageLayout::default(),
        }
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as
    /// YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .config_context(format!("Failed to read {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&contents)
                .config_context(format!("Failed to parse {}", path.display()))?
        } else {
            serde_yaml::from_str(&contents)
                .config_context(format!("Failed to parse {}", path.display()))?
        };

        debug!("loaded config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML (JSON is accepted too)
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).config_context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .config_context(format!("Invalid base_url '{}'", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.collection.trim_matches('/').trim().is_empty() {
            return Err(Error::config("collection must not be empty"));
        }
        if self.worker_threads == 0 {
            return Err(Error::config("worker_threads must be at least 1"));
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::config("http.timeout_secs must be at least 1"));
        }
        if self.http.initial_backoff_ms > self.http.max_backoff_ms {
            return Err(Error::config(
                "http.initial_backoff_ms must not exceed http.max_backoff_ms",
            ));
        }
        Ok(())
    }

    /// Transport settings derived from this config
    pub fn transport_config(&self) -> HttpTransportConfig {
        let http = &self.http;
        let mut config = HttpTransportConfig::builder(self.base_url.clone())
            .timeout(Duration::from_secs(http.timeout_secs))
            .max_retries(http.max_retries)
            .backoff(
                http.backoff,
                Duration::from_millis(http.initial_backoff_ms),
                Duration::from_millis(http.max_backoff_ms),
            );

        config = match &http.rate_limit {
            Some(limit) => config.rate_limit(limit.clone()),
            None => config.no_rate_limit(),
        };
        if let Some(agent) = &http.user_agent {
            config = config.user_agent(agent.clone());
        }
        for (key, value) in &http.default_headers {
            config = config.header(key.clone(), value.clone());
        }
        config.build()
    }

    /// Build an HTTP-backed client
    pub fn build_client(&self) -> Result<ResourceClient> {
        self.validate()?;
        let transport = HttpTransport::new(self.transport_config())?;

        let mut builder = ResourceClient::builder()
            .transport(Arc::new(transport))
            .collection(self.collection.clone())
            .page_layout(self.page_layout.clone())
            .worker_threads(self.worker_threads);
        if let Some(version) = &self.api_version {
            builder = builder.api_version(version.clone());
        }
        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff shape
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Backoff ceiling in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Token bucket settings; `null` disables rate limiting
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub default_headers: StringMap,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: default_rate_limit(),
            user_agent: None,
            default_headers: StringMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60000
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}
