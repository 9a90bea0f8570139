//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Run configuration, built once and read-only afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of events (loop iterations) to generate
    #[serde(default)]
    pub event_count: u64,

    /// Gateway authority (`host` or `host:port`)
    #[serde(default = "default_gateway")]
    pub gateway: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Fixed part of the pause between requests
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound (inclusive) of the random part of the pause
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Print the request plan instead of sending it
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_count: 0,
            gateway: default_gateway(),
            timeout_seconds: default_timeout_secs(),
            base_delay_ms: default_base_delay_ms(),
            max_jitter_ms: default_max_jitter_ms(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            dry_run: false,
        }
    }
}

impl Config {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Base delay as Duration
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        validate_gateway(&self.gateway)?;

        if self.timeout_seconds == 0 {
            return Err(AppError::validation("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > 300 {
            return Err(AppError::validation("Timeout cannot exceed 300 seconds"));
        }

        if self.base_delay_ms > 10_000 {
            return Err(AppError::validation("Base delay cannot exceed 10000 ms"));
        }

        if self.max_jitter_ms > 10_000 {
            return Err(AppError::validation("Jitter cannot exceed 10000 ms"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(gateway) = std::env::var("GATEWAY_HOST") {
            let gateway = gateway.trim();
            if !gateway.is_empty() {
                self.gateway = gateway.to_string();
            }
        }

        if let Ok(timeout) = std::env::var("REQUEST_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.parse()
                .map_err(|e| AppError::config(format!("Invalid REQUEST_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(base_delay) = std::env::var("BASE_DELAY_MS") {
            self.base_delay_ms = base_delay.parse()
                .map_err(|e| AppError::config(format!("Invalid BASE_DELAY_MS value '{}': {}", base_delay, e)))?;
        }

        if let Ok(jitter) = std::env::var("MAX_JITTER_MS") {
            self.max_jitter_ms = jitter.parse()
                .map_err(|e| AppError::config(format!("Invalid MAX_JITTER_MS value '{}': {}", jitter, e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// A gateway is an HTTP authority: non-empty, no scheme, no path
pub fn validate_gateway(gateway: &str) -> Result<()> {
    if gateway.trim().is_empty() {
        return Err(AppError::config("Gateway host cannot be empty"));
    }

    if gateway.contains("://") || gateway.contains('/') {
        return Err(AppError::config(format!(
            "Gateway must be given as host[:port] without scheme or path: {}", gateway
        )));
    }

    let parsed = url::Url::parse(&format!("http://{}/", gateway))
        .map_err(|e| AppError::config(format!("Invalid gateway host '{}': {}", gateway, e)))?;

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(AppError::config(format!("Gateway has no host: {}", gateway)));
    }

    Ok(())
}

fn default_gateway() -> String {
    crate::defaults::DEFAULT_GATEWAY.to_string()
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_base_delay_ms() -> u64 {
    crate::defaults::DEFAULT_BASE_DELAY_MS
}

fn default_max_jitter_ms() -> u64 {
    crate::defaults::DEFAULT_MAX_JITTER_MS
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
