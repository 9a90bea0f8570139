//! Configuration management module

pub mod parser;
pub mod env;

// Re-export main functionality
pub use parser::{ConfigParser, Invocation, load_config, display_config_summary, parse_event_count};
pub use env::EnvManager;

// Re-export from models for convenience
pub use crate::models::Config;

/// Serializes tests that touch process environment variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
