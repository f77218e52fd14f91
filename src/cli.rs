//! CLI parsing and command execution for the diagnostic binary.
//!
//! Three commands cover the admin surface: `path` prints the derived
//! candidate list for a selection, `resolve` probes the candidates and
//! prints the first that exists, and `verify` reports existence of all
//! twelve feature/level combinations in a table.

use crate::config::DeployContext;
use crate::error::ResolveError;
use crate::fetch::HttpFetcher;
use crate::resolver::{
    debug_report, generate_path, resolve_existing_path, verify_all_combinations,
    CombinationReport,
};
use crate::selection::{Feature, Level, Selection, View};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tunetree",
    about = "Diagnostics for music-tradition tree data paths"
)]
pub struct Cli {
    /// Host name used to pick the production or development base-path set
    #[arg(long)]
    pub host: Option<String>,

    /// Base URL prefix for production deployments
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level override (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format override (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the derived path info and candidate list for a selection
    Path(SelectionArgs),
    /// Probe candidate paths in order and print the first that exists
    Resolve(SelectionArgs),
    /// Probe all feature/level combinations and print an existence table
    Verify(SelectionArgs),
}

#[derive(Debug, Args)]
pub struct SelectionArgs {
    #[arg(long, value_enum, default_value_t = View::Traditions)]
    pub view: View,

    #[arg(long)]
    pub tradition: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long, value_enum, default_value_t = Feature::Chromatic)]
    pub feature: Feature,

    #[arg(long, value_enum, default_value_t = Level::Combined)]
    pub level: Level,
}

impl SelectionArgs {
    pub fn to_selection(&self) -> Selection {
        Selection {
            view: self.view,
            tradition: self.tradition.clone(),
            genre: self.genre.clone(),
            feature: self.feature,
            level: self.level,
        }
    }
}

/// Execution context shared by all commands.
pub struct RunContext {
    deploy: DeployContext,
}

impl RunContext {
    pub fn new(deploy: DeployContext) -> Self {
        Self { deploy }
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, ResolveError> {
        match command {
            Commands::Path(args) => {
                let info = generate_path(&args.to_selection(), &self.deploy)?;
                Ok(debug_report(&info))
            }
            Commands::Resolve(args) => {
                let fetcher = HttpFetcher::new()?;
                let resolved =
                    resolve_existing_path(&fetcher, &args.to_selection(), &self.deploy).await?;
                Ok(resolved.working_path)
            }
            Commands::Verify(args) => {
                let fetcher = HttpFetcher::new()?;
                let reports =
                    verify_all_combinations(&fetcher, &args.to_selection(), &self.deploy).await?;
                Ok(format_verify_table(&reports))
            }
        }
    }
}

/// Render combination reports as a table, one row per combination.
pub fn format_verify_table(reports: &[CombinationReport]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Feature", "Level", "First candidate", "Exists"]);

    for report in reports {
        let exists = if report.exists {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        table.add_row(vec![
            report.combination.feature.to_string(),
            report.combination.level.to_string(),
            report
                .combination
                .path_info
                .full_paths
                .first()
                .cloned()
                .unwrap_or_default(),
            exists,
        ]);
    }

    table.to_string()
}

/// Map errors to user-facing messages.
pub fn map_error(err: &ResolveError) -> String {
    match err {
        ResolveError::MissingParameter { view, field } => format!(
            "The {} view needs a --{} argument.",
            view, field
        ),
        ResolveError::NotFound { view } => format!(
            "No tree file was found for the {} view. Check the host/base-url settings and that the preprocessed data is deployed.",
            view
        ),
        ResolveError::FetchFailed { path, reason } => {
            format!("Found {} but could not load it: {}", path, reason)
        }
        ResolveError::Http(err) => format!("HTTP error: {}", err),
        ResolveError::Config(msg) => format!("Configuration problem: {}", msg),
    }
}
