//! Patchbay CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "patchbay")]
#[command(about = "Visual media pipeline editor backend: graph <-> filter-tree conversion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Validation oracle provider: accept, http or process
    #[arg(long, default_value = "accept")]
    oracle: String,

    /// Endpoint for the http oracle
    #[arg(long)]
    oracle_url: Option<String>,

    /// Command line for the process oracle (e.g. "python3 oracle.py")
    #[arg(long)]
    oracle_cmd: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an editor graph JSON file into a canonical filter tree
    Export {
        /// Graph JSON file ({"nodes": [...], "edges": [...]})
        input: PathBuf,

        /// Where to write the tree (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Expand a stored filter tree back into a positioned graph
    Import {
        /// Tree JSON file
        input: PathBuf,

        /// Where to write the graph (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a stored tree past the oracle without expanding it
    Validate {
        /// Tree JSON file
        input: PathBuf,
    },
    /// Start the HTTP API for the editor front-end
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7811")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "patchbay={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let oracle = patchbay_oracle::create_validator(&cli.oracle, cli.oracle_url, cli.oracle_cmd)?;
    tracing::debug!("Using `{}` oracle", oracle.name());

    match cli.command {
        Commands::Export { input, output } => commands::export(input, output, oracle).await,
        Commands::Import { input, output } => commands::import(input, output, oracle).await,
        Commands::Validate { input } => commands::validate(input, oracle).await,
        Commands::Serve { port, host } => commands::serve(host, port, oracle).await,
        Commands::Version => {
            println!("Patchbay v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
