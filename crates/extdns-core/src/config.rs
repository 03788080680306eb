//! Configuration types for the webhook provider
//!
//! [`NifcloudConfig`] is what the provider adapter itself consumes.
//! [`WebhookConfig`] adds the process-level settings the hosting transport
//! needs, and knows how to load everything from environment variables:
//!
//! - `NIFCLOUD_ACCESS_KEY_ID`: API access key id (required)
//! - `NIFCLOUD_SECRET_ACCESS_KEY`: API secret access key (required)
//! - `NIFCLOUD_REGION`: API region (default `jp-east-1`)
//! - `PORT`: Listening port for the webhook server (default 8888)
//! - `EXTDNS_MODE`: Set to `dry-run` to log changes without submitting them
//! - `EXTDNS_LOG_LEVEL`: trace, debug, info, warn or error (default info)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default NIFCLOUD API region
pub const DEFAULT_REGION: &str = "jp-east-1";

/// Default webhook listening port
pub const DEFAULT_PORT: u16 = 8888;

/// NIFCLOUD provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct NifcloudConfig {
    /// API access key id
    pub access_key_id: String,

    /// API secret access key
    /// ⚠️ NEVER log this value
    pub secret_access_key: String,

    /// API region
    #[serde(default = "default_region")]
    pub region: String,

    /// Log change batches instead of submitting them
    #[serde(default)]
    pub dry_run: bool,

    /// Upper bound on one full record listing (in seconds)
    #[serde(default = "default_records_timeout_secs")]
    pub records_timeout_secs: u64,
}

impl NifcloudConfig {
    /// Create a configuration with default region and timeouts
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: default_region(),
            dry_run: false,
            records_timeout_secs: default_records_timeout_secs(),
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the record listing timeout
    pub fn with_records_timeout_secs(mut self, secs: u64) -> Self {
        self.records_timeout_secs = secs;
        self
    }

    /// Record listing timeout as a [`Duration`]
    pub fn records_timeout(&self) -> Duration {
        Duration::from_secs(self.records_timeout_secs)
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<()> {
        if self.access_key_id.is_empty() {
            return Err(Error::config("access key id is required"));
        }
        if self.secret_access_key.is_empty() {
            return Err(Error::config("secret access key is required"));
        }
        if self.region.is_empty() {
            return Err(Error::config("region cannot be empty"));
        }
        if self.records_timeout_secs == 0 {
            return Err(Error::config("records timeout must be > 0"));
        }
        Ok(())
    }
}

// Custom Debug implementation that hides the secret access key
impl fmt::Debug for NifcloudConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NifcloudConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<REDACTED>")
            .field("region", &self.region)
            .field("dry_run", &self.dry_run)
            .field("records_timeout_secs", &self.records_timeout_secs)
            .finish()
    }
}

/// Process-level configuration for a webhook host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Provider configuration
    pub provider: NifcloudConfig,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server read timeout (in seconds)
    #[serde(default = "default_server_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Server write timeout (in seconds)
    #[serde(default = "default_server_timeout_secs")]
    pub write_timeout_secs: u64,

    /// Log level name
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl WebhookConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Missing variables fall back to defaults; credentials fall back to the
    /// empty string so that [`WebhookConfig::validate`] can report them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|e| Error::config(format!("'PORT' is invalid: {}", e)))?,
            None => default_port(),
        };

        let mode = lookup("EXTDNS_MODE").unwrap_or_default().to_lowercase();
        let dry_run = match mode.as_str() {
            "dry-run" => true,
            "" | "live" => false,
            other => {
                return Err(Error::config(format!(
                    "EXTDNS_MODE '{}' is not valid. Valid modes: live, dry-run",
                    other
                )));
            }
        };

        let provider = NifcloudConfig {
            access_key_id: lookup("NIFCLOUD_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: lookup("NIFCLOUD_SECRET_ACCESS_KEY").unwrap_or_default(),
            region: lookup("NIFCLOUD_REGION")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(default_region),
            dry_run,
            records_timeout_secs: default_records_timeout_secs(),
        };

        Ok(Self {
            provider,
            port,
            read_timeout_secs: default_server_timeout_secs(),
            write_timeout_secs: default_server_timeout_secs(),
            log_level: lookup("EXTDNS_LOG_LEVEL").unwrap_or_else(default_log_level),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.provider.access_key_id.is_empty() {
            return Err(Error::config(
                "environment variable 'NIFCLOUD_ACCESS_KEY_ID' is required",
            ));
        }
        if self.provider.secret_access_key.is_empty() {
            return Err(Error::config(
                "environment variable 'NIFCLOUD_SECRET_ACCESS_KEY' is required",
            ));
        }
        self.provider.validate()?;

        if self.port == 0 {
            return Err(Error::config("'PORT' is invalid: port must be > 0"));
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Error::config(format!(
                    "EXTDNS_LOG_LEVEL '{}' is not valid. \
                    Valid levels: trace, debug, info, warn, error",
                    self.log_level
                )));
            }
        }

        if self.provider.dry_run {
            tracing::warn!("DRY-RUN mode enabled, no changes will be made");
        }

        Ok(())
    }

    /// Address the webhook server should bind
    pub fn listen_addr(&self) -> String {
        format!(":{}", self.port)
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_records_timeout_secs() -> u64 {
    30
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_server_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
