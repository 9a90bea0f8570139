//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variables read by [`crate::models::Config::merge_from_env`]
pub const KNOWN_VARS: &[&str] = &[
    "GATEWAY_HOST",
    "REQUEST_TIMEOUT_SECONDS",
    "BASE_DELAY_MS",
    "MAX_JITTER_MS",
    "ENABLE_COLOR",
];

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load a specific env file if it exists; a missing file is not an error
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Check every known variable that is set, stopping at the first bad one
    pub fn validate_environment() -> Result<()> {
        for key in KNOWN_VARS {
            if let Ok(value) = std::env::var(key) {
                Self::validate_env_var(key, &value)?;
            }
        }
        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "GATEWAY_HOST" => crate::models::config::validate_gateway(value.trim()),
            "REQUEST_TIMEOUT_SECONDS" => {
                let timeout: u64 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid REQUEST_TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > 300 {
                    return Err(AppError::validation(format!("REQUEST_TIMEOUT_SECONDS must be between 1 and 300, got: {}", timeout)));
                }
                Ok(())
            }
            "BASE_DELAY_MS" | "MAX_JITTER_MS" => {
                let millis: u64 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
                if millis > 10_000 {
                    return Err(AppError::validation(format!("{} cannot exceed 10000, got: {}", key, millis)));
                }
                Ok(())
            }
            "ENABLE_COLOR" => {
                value.parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
