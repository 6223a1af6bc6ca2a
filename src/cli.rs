//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "hostsfilter")]
#[command(author, version, about = "Hosts file blocklist manager")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage blocklist sources and the saved selection
    Sources {
        #[command(subcommand)]
        action: SourcesAction,
    },

    /// Estimate what applying the selection would add
    Preview {
        /// Source to use instead of the saved selection (repeatable, in precedence order)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show a unified diff between the hosts file and the merged result
    Diff {
        /// Source to use instead of the saved selection (repeatable, in precedence order)
        #[arg(short, long = "source")]
        sources: Vec<String>,
    },

    /// Merge the selected sources and write the hosts file
    Apply {
        /// Source to use instead of the saved selection (repeatable, in precedence order)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Dry-run mode: fetch, merge and show the diff, but don't write
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the whitelist
    Whitelist {
        #[command(subcommand)]
        action: WhitelistAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand)]
pub enum SourcesAction {
    /// List known sources and whether they are selected
    List,
    /// Add a source to the saved selection
    Select {
        /// Source name
        name: String,
    },
    /// Remove a source from the saved selection
    Deselect {
        /// Source name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum WhitelistAction {
    /// Add a domain to the whitelist
    Add {
        /// Domain to never block
        domain: String,
    },
    /// Remove a domain from the whitelist
    Del {
        /// Domain to remove
        domain: String,
    },
    /// List whitelisted domains
    List,
}
