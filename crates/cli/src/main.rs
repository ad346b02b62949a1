//! Thermowise CLI: the main entry point.
//!
//! Commands:
//! - `ask`      Answer one question
//! - `chat`     Interactive question loop
//! - `status`   Show configuration, service and dataset status
//! - `start`    Try once to start the inference service
//! - `stats`    Print dataset statistics
//! - `onboard`  Write the default config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "thermowise",
    about = "Thermowise: ask questions about your thermostat data",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.thermowise/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Thermostat CSV export to load
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question text
        question: Vec<String>,
    },

    /// Interactive question loop
    Chat,

    /// Show configuration, service and dataset status
    Status,

    /// Make one attempt to start the inference service
    Start,

    /// Print statistics for the loaded dataset
    Stats,

    /// Write the default configuration file
    Onboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let opts = commands::GlobalOpts {
        config: cli.config,
        data: cli.data,
    };

    match cli.command {
        Commands::Ask { question } => commands::ask::run(&opts, &question.join(" ")).await?,
        Commands::Chat => commands::chat::run(&opts).await?,
        Commands::Status => commands::status::run(&opts).await?,
        Commands::Start => commands::start::run(&opts).await?,
        Commands::Stats => commands::stats::run(&opts)?,
        Commands::Onboard => commands::onboard::run(&opts)?,
    }

    Ok(())
}
