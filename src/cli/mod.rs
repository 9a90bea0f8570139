//! Command-line interface

use clap::Parser;
use std::io::IsTerminal;

/// Generate synthetic GET traffic against the m1/m2 item endpoints of a gateway
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "generate-traffic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of events to generate (two requests each, plus two extra every 7th event)
    #[arg(value_name = "EventCount", allow_negative_numbers = true)]
    pub event_count: Option<String>,

    /// Mode flag; `local` targets the gateway on localhost:80
    #[arg(value_name = "MODE")]
    pub mode: Option<String>,

    /// Gateway host[:port] to target
    #[arg(long, value_name = "HOST", conflicts_with = "mode")]
    pub gateway: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// Print the planned requests without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Whether the alternate host was requested
    pub fn wants_alternate_gateway(&self) -> bool {
        self.mode.as_deref() == Some(crate::defaults::ALTERNATE_MODE_FLAG)
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Duration cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Logs and errors go to stderr
    std::io::stderr().is_terminal()
}
