mod client;
mod commands;
mod config;
mod domain;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fabricheck",
    version,
    about = "Session-based health reporting client for Cisco ACI fabrics"
)]
struct Cli {
    /// Path to config file (default: ./config.yaml, then
    /// ~/.config/fabricheck/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full fabric health report: fault summary plus node status
    Report {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Fault summary only
    Faults {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Node status only
    Nodes {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Verify controller reachability and credentials
    Check,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config_path = config::resolve_path(cli.config.as_deref());

    match cli.command {
        Commands::Report { format } => commands::report::run(&config_path, &format),
        Commands::Faults { format } => commands::faults::run(&config_path, &format),
        Commands::Nodes { format } => commands::nodes::run(&config_path, &format),
        Commands::Check => commands::check::run(&config_path),
    }
}
