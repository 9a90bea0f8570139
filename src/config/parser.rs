//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::{AppError, Result},
    config::env::EnvManager,
};
use std::path::PathBuf;

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// EventCount was not given; print usage and stop
    Usage,
    /// A fully validated run
    Run(Config),
}

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
    env_file: PathBuf,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env_file: PathBuf::from(".env"),
        }
    }

    /// Read defaults from a different env file
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Invocation> {
        let Some(raw_count) = self.cli.event_count.as_deref() else {
            return Ok(Invocation::Usage);
        };
        let event_count = parse_event_count(raw_count)?;

        // Start with default configuration
        let mut config = Config::default();

        EnvManager::load_env_file_from(&self.env_file, self.cli.debug)?;
        EnvManager::validate_environment()?;
        config.merge_from_env()?;

        config.event_count = event_count;
        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(Invocation::Run(config))
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(ref gateway) = self.cli.gateway {
            config.gateway = gateway.trim().to_string();
        }

        // The mode flag wins over GATEWAY_HOST; clap keeps it apart from --gateway
        if self.cli.wants_alternate_gateway() {
            config.gateway = crate::defaults::ALTERNATE_GATEWAY.to_string();
        }

        if self.cli.color {
            config.enable_color = true;
        } else if self.cli.no_color {
            config.enable_color = false;
        } else {
            // ENABLE_COLOR can only narrow what the terminal allows
            config.enable_color = config.enable_color && self.cli.use_colors();
        }

        // CLI-only switches
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        config.dry_run = self.cli.dry_run;
    }
}

/// EventCount must be a plain non-negative integer
pub fn parse_event_count(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();

    if trimmed.starts_with('-') {
        return Err(AppError::parse(format!(
            "EventCount must be a non-negative integer, got '{}'", raw
        )));
    }

    if trimmed.starts_with('+') {
        return Err(AppError::parse(format!("Invalid EventCount '{}'", raw)));
    }

    trimmed.parse::<u64>()
        .map_err(|e| AppError::parse(format!("Invalid EventCount '{}': {}", raw, e)))
}

/// Convenience function to turn CLI arguments into an invocation
pub fn load_config(cli: Cli) -> Result<Invocation> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Event Count: {}", config.event_count));
    summary.push(format!("Gateway: {}", config.gateway));
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Pause: {}ms + 0..={}ms jitter", config.base_delay_ms, config.max_jitter_ms));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));
    summary.push(format!("Dry Run: {}", config.dry_run));

    summary.join("\n")
}
