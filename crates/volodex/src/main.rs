//! Volodex command-line launcher

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use volodex::cli;
use volodex::cli::config::VolodexConfig;
use volodex_logging::{init_logging, LogConfig};

#[derive(Parser, Debug)]
#[command(name = "volodex", version, about = "Browse commander-legal creature types")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Catalog store (default: ~/.volodex/volodex.json)
    #[arg(long, global = true, env = "VOLODEX_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse creature types, excluding those used by a deck list
    Run(cli::run::RunArgs),

    /// Download the MTGJSON AtomicCards bulk dataset
    Download(cli::download::DownloadArgs),

    /// Rebuild the catalog from the bulk dataset
    Update(cli::update::UpdateArgs),

    /// Show resolved paths and settings
    Config(cli::config::ConfigArgs),
}

fn run_command(cli: Cli, config: VolodexConfig) -> Result<()> {
    let catalog = cli.catalog.unwrap_or_else(|| config.catalog_path());
    debug!(catalog = %catalog.display(), "resolved catalog path");

    match cli.command {
        Commands::Run(args) => cli::run::run(args, &config, &catalog),
        Commands::Download(args) => cli::download::run(args, &config),
        Commands::Update(args) => cli::update::run(args, &config, &catalog),
        Commands::Config(args) => cli::config::run(args, &config, &catalog),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The TUI owns the terminal; keep console logs off the alternate screen.
    let tui_mode = matches!(cli.command, Commands::Run(_));
    if let Err(err) = init_logging(LogConfig {
        app_name: "volodex",
        verbose: cli.verbose,
        tui_mode,
    }) {
        eprintln!("Warning: logging disabled: {:#}", err);
    }

    let result = VolodexConfig::load_default()
        .map_err(anyhow::Error::from)
        .and_then(|config| run_command(cli, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // HelpfulError already formats its own context and suggestions.
            if let Some(helpful) = err.downcast_ref::<cli::error::HelpfulError>() {
                eprint!("{}", helpful);
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(1)
        }
    }
}
