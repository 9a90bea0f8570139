//! Data models and structures for the traffic generator

pub mod config;
pub mod request;
pub mod summary;

// Re-export main model types
pub use config::Config;
pub use request::{GatewayRequest, GatewayResponse};
pub use summary::RunSummary;
