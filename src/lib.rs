//! # HostsFilter - hosts file blocklist manager
//!
//! Merges entries the operator wants to keep with entries pulled from
//! third-party blocklists, drops duplicates and whitelisted domains, and shows
//! a reviewable diff before anything is written to `/etc/hosts`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       HostsFilter                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: sources, preview, diff, apply, whitelist   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Catalog of sources, saved selection                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── Concurrent downloads into a SourceMap                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Merger                                                     │
//! │    └── First-claim dedup, whitelist filtering, stats        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Diff (similar) / Writer (backup + atomic replace)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use hostsfilter::config::Config;
//! use hostsfilter::diff::generate_diff;
//! use hostsfilter::fetcher::Fetcher;
//! use hostsfilter::hosts::{parse_content, SYSTEM_SOURCE};
//! use hostsfilter::merger::{merge_entries, system_section};
//! use hostsfilter::whitelist::load_whitelist;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("/etc/hostsfilter/config.yaml")?;
//!     let catalog = config.catalog()?;
//!
//!     let current = std::fs::read_to_string(&config.hosts_path)?;
//!     let system = parse_content(system_section(&current), SYSTEM_SOURCE);
//!     let whitelist = load_whitelist(&config.whitelist_path)?;
//!
//!     let fetcher = Fetcher::new(config.fetch_timeout())?;
//!     let sources = fetcher
//!         .fetch_sources(&catalog.resolve(&config.selected_sources)?)
//!         .await;
//!
//!     let merged = merge_entries(&system, &whitelist, &config.selected_sources, &sources);
//!     for line in generate_diff(&current, &merged.content, "current", "new") {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Known blocklist sources
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`diff`] - Unified line diff
//! - [`error`] - Typed errors for the write path and selection
//! - [`fetcher`] - HTTP client for downloading sources
//! - [`fs_abstraction`] - Mockable filesystem operations
//! - [`hosts`] - Hosts file entry parsing and rendering
//! - [`merger`] - Dedup merge and preview statistics
//! - [`utils`] - Common utility functions
//! - [`whitelist`] - Whitelist file handling
//! - [`writer`] - Backup-then-write of the hosts file

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod fetcher;
pub mod fs_abstraction;
pub mod hosts;
pub mod merger;
pub mod utils;
pub mod whitelist;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::HostsError;
