use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use riskdeck::cli;
use riskdeck::config;
use riskdeck::errors::DashError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        cli::Commands::Repl => cli::repl::handle_repl(config_path).await,
        cli::Commands::Scan(args) => cli::scan::handle_scan(args, config_path, cli.quiet).await,
        cli::Commands::Ask(args) => cli::ask::handle_ask(args, cli.quiet).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), DashError> {
    let path = PathBuf::from(&args.config);
    let settings = config::load_settings(Some(&path)).await?;
    println!(
        "Configuration is valid: {} ({} phases, total weight {})",
        args.config,
        settings.table.len(),
        settings.table.total_weight()
    );
    Ok(())
}
