//! Gateway Traffic Generator
//!
//! Issues a configurable number of synthetic GET requests against the item
//! endpoints of a service gateway, pacing them with a randomized delay and
//! echoing every response body to standard output.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, GatewayRequest, GatewayResponse, RunSummary};
pub use client::{GatewayClient, HttpGatewayClient};
pub use generator::{TrafficGenerator, Jitter, JitterPacer, Pacer};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_GATEWAY: &str = "localhost:8099";
    /// Host selected by the `local` mode flag (plain port 80)
    pub const ALTERNATE_GATEWAY: &str = "localhost";
    pub const ALTERNATE_MODE_FLAG: &str = "local";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_BASE_DELAY_MS: u64 = 10;
    pub const DEFAULT_MAX_JITTER_MS: u64 = 100;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const M1_ITEMS_PATH: &str = "/gateway/m1/items";
    pub const M2_ITEMS_PATH: &str = "/gateway/m2/items";
    /// Already percent-encoded; sent verbatim
    pub const M1_SPACED_RESOURCE: &str = "x%20y";
    pub const M2_SPACED_RESOURCE: &str = "z%20t";
    /// Every event whose index is a multiple of this also requests the spaced resources
    pub const SPACED_RESOURCE_PERIOD: u64 = 7;
}
