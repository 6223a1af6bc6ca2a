//! HostsFilter - hosts file blocklist manager
//!
//! Merges third-party blocklists into /etc/hosts while preserving system entries.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use hostsfilter::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Sources { action } => hostsfilter::commands::sources::run(action, &cli.config).await,
        Commands::Preview { sources, json } => {
            hostsfilter::commands::preview::run(sources, json, &cli.config).await
        }
        Commands::Diff { sources } => hostsfilter::commands::diff::run(sources, &cli.config).await,
        Commands::Apply { sources, dry_run } => {
            hostsfilter::commands::apply::run(sources, dry_run, &cli.config).await
        }
        Commands::Whitelist { action } => {
            hostsfilter::commands::whitelist::run(action, &cli.config).await
        }
        Commands::Version => {
            println!("hostsfilter {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
