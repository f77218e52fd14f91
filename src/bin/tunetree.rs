//! Tunetree diagnostic CLI binary.

use clap::Parser;
use std::process;
use tracing::{error, info};
use tunetree::cli::{map_error, Cli, RunContext};
use tunetree::config::{DeployContext, TunetreeConfig};
use tunetree::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match TunetreeConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("tunetree CLI starting");

    // CLI flags override the configured deployment context.
    let deploy = DeployContext::new(
        cli.host.clone().unwrap_or(config.deploy.host),
        cli.base_url.clone().unwrap_or(config.deploy.base_url),
    );

    let context = RunContext::new(deploy);
    match context.execute(&cli.command).await {
        Ok(output) => {
            info!("command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Merge logging settings. Precedence: CLI flags over config file over
/// defaults.
fn build_logging_config(cli: &Cli, config: &TunetreeConfig) -> tunetree::logging::LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }

    logging
}
