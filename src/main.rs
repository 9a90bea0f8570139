//! Gateway Traffic Generator - CLI entry point

use clap::Parser;
use gateway_traffic_generator::{
    app::App,
    cli::Cli,
    output::format_arg_listing,
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    // Echo before any validation
    println!("{}", format_arg_listing(&args));

    let cli = Cli::parse_from(&args);
    let use_color = cli.use_colors();
    let program = args.first().cloned().unwrap_or_else(|| "generate-traffic".to_string());

    if let Err(e) = App::new(cli, program).run().await {
        eprintln!("{}", e.format_for_console(use_color));

        if let Some(suggestion) = e.suggestion() {
            eprintln!();
            eprintln!("Suggestion: {}", suggestion);
        }

        process::exit(e.exit_code());
    }
}
