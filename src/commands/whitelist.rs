//! Whitelist command implementation.

use anyhow::Result;
use std::path::Path;

use crate::cli::WhitelistAction;
use crate::config::Config;
use crate::whitelist::{add_domain, list_domains, remove_domain};

/// Run the whitelist command
pub async fn run(action: WhitelistAction, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let path = config.whitelist_path.as_path();

    match action {
        WhitelistAction::Add { domain } => {
            if add_domain(path, &domain)? {
                println!("[OK] Added {} to whitelist", domain.trim());
                println!("     Run 'hostsfilter apply' to apply changes");
            } else {
                println!("{} is already in the whitelist", domain.trim());
            }
        }
        WhitelistAction::Del { domain } => {
            if remove_domain(path, &domain)? {
                println!("[OK] Removed {} from whitelist", domain.trim());
                println!("     Run 'hostsfilter apply' to apply changes");
            } else {
                println!("{} was not in the whitelist", domain.trim());
            }
        }
        WhitelistAction::List => {
            let domains = list_domains(path)?;
            println!();
            println!("Whitelist {:?} ({} entries):", path, domains.len());
            println!();
            if domains.is_empty() {
                println!("  (empty)");
            } else {
                for domain in &domains {
                    println!("  {}", domain);
                }
            }
            println!();
        }
    }

    Ok(())
}
