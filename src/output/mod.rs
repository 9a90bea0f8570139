//! Terminal text: argument echo, usage, banner and run summary

use crate::models::{Config, RunSummary};
use colored::Colorize;

/// One `Arg# <index> <value>` line per command-line argument, program name included
pub fn format_arg_listing<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .enumerate()
        .map(|(i, arg)| format!("Arg# {} {}", i, arg.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shown when EventCount is missing
pub fn usage_message(program: &str) -> String {
    format!(
        "Syntax error. Number of events is required.\n{} <EventCount> [{}]",
        program,
        crate::defaults::ALTERNATE_MODE_FLAG
    )
}

/// Name and build info printed in debug mode
pub fn format_banner() -> String {
    let mut banner = format!("{} v{} (built {}", crate::PKG_NAME, crate::VERSION, crate::BUILD_TIME);
    if let Some(commit) = crate::GIT_COMMIT {
        banner.push_str(&format!(", commit {}", commit));
    }
    banner.push(')');
    banner
}

/// Multi-line summary of a finished run
pub fn format_run_summary(config: &Config, summary: &RunSummary, use_color: bool) -> String {
    let title = "Traffic run summary";
    let failures = summary.non_success_responses;

    let failures_str = if use_color && failures > 0 {
        failures.to_string().yellow().to_string()
    } else {
        failures.to_string()
    };

    let mut lines = vec![
        if use_color { title.bold().to_string() } else { title.to_string() },
        format!("  Gateway:            {}", config.gateway),
        format!("  Events:             {}", summary.events),
        format!("  Requests sent:      {}", summary.requests_sent),
        format!("  Non-2xx responses:  {}", failures_str),
        format!("  Time paused:        {:.1} ms", summary.total_pause.as_secs_f64() * 1000.0),
        format!("  Elapsed:            {:.1} ms", summary.elapsed_ms()),
    ];

    if summary.requests_sent > 0 {
        lines.push(format!("  Throughput:         {:.2} req/s", summary.requests_per_second()));
    }

    lines.join("\n")
}
