//! Main application orchestration and execution

use crate::{
    cli::Cli,
    client::HttpGatewayClient,
    config::{display_config_summary, load_config, Invocation},
    error::Result,
    generator::{write_plan, Jitter, JitterPacer, TrafficGenerator},
    logging::Logger,
    output::{format_banner, format_run_summary, usage_message},
    models::{Config, RunSummary},
};
use std::io::{self, Write};

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
    program: String,
}

impl App {
    /// `program` is the invoking command, used in the usage message
    pub fn new(cli: Cli, program: impl Into<String>) -> Self {
        Self {
            cli,
            program: program.into(),
        }
    }

    /// Run the application against stdout
    pub async fn run(self) -> Result<()> {
        let mut stdout = io::stdout();
        self.run_with_output(&mut stdout).await.map(|_| ())
    }

    /// Run the application, writing bodies (or the dry-run plan) to `out`
    ///
    /// Returns the run summary, or `None` when nothing was sent.
    pub async fn run_with_output<W: Write>(self, out: &mut W) -> Result<Option<RunSummary>> {
        let config = match load_config(self.cli.clone())? {
            Invocation::Usage => {
                writeln!(out, "{}", usage_message(&self.program))?;
                return Ok(None);
            }
            Invocation::Run(config) => config,
        };

        if !config.enable_color {
            colored::control::set_override(false);
        }

        let logger = Logger::with_config("generator", &config);
        logger.start_session().await;
        logger.add_context_field("gateway".to_string(), &config.gateway).await;

        if config.debug {
            eprintln!("{}", format_banner());
            eprintln!("{}", display_config_summary(&config));
            crate::log_debug!(logger, "Configuration: {}", serde_json::to_string(&config)?);
        }

        self.warn_on_unknown_mode(&logger).await;

        if config.dry_run {
            let planned = write_plan(&config.gateway, config.event_count, out)?;
            crate::log_info!(logger, "Dry run: {} requests planned, none sent", planned);
            return Ok(None);
        }

        let summary = Self::generate(&config, logger, out).await?;

        if config.verbose {
            eprintln!("{}", format_run_summary(&config, &summary, config.enable_color));
        }

        Ok(Some(summary))
    }

    async fn generate<W: Write>(config: &Config, logger: Logger, out: &mut W) -> Result<RunSummary> {
        let client = HttpGatewayClient::from_config(config)?;
        let pacer = JitterPacer::new(Jitter::from_config(config));
        let mut generator = TrafficGenerator::new(client, pacer, config.gateway.clone(), logger);

        generator.run(config.event_count, out).await
    }

    async fn warn_on_unknown_mode(&self, logger: &Logger) {
        if let Some(mode) = self.cli.mode.as_deref() {
            if !self.cli.wants_alternate_gateway() {
                crate::log_warn!(
                    logger,
                    "Ignoring unrecognized mode '{}' (only '{}' is supported)",
                    mode,
                    crate::defaults::ALTERNATE_MODE_FLAG
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_LOCK;
    use clap::Parser;

    #[tokio::test]
    async fn test_missing_event_count_prints_usage() {
        let cli = Cli::parse_from(["generate-traffic"]);
        let mut out = Vec::new();
        let summary = App::new(cli, "generate-traffic").run_with_output(&mut out).await.unwrap();

        assert!(summary.is_none());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Syntax error. Number of events is required."));
        assert!(text.contains("generate-traffic <EventCount>"));
    }

    #[tokio::test]
    async fn test_dry_run_sends_nothing() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // Port 1 on loopback: any real request would fail the test
        let cli = Cli::parse_from(["generate-traffic", "8", "--dry-run", "--gateway", "127.0.0.1:1"]);
        let mut out = Vec::new();
        let summary = App::new(cli, "generate-traffic").run_with_output(&mut out).await.unwrap();

        assert!(summary.is_none());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 20);
        assert!(text.lines().all(|l| l.starts_with("GET http://127.0.0.1:1/gateway/")));
    }

    #[tokio::test]
    async fn test_bad_event_count_is_error() {
        let cli = Cli::parse_from(["generate-traffic", "lots"]);
        let result = App::new(cli, "generate-traffic").run_with_output(&mut Vec::new()).await;
        assert!(matches!(result, Err(crate::AppError::Parse(_))));
    }
}
