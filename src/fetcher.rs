//! HTTP fetcher for downloading blocklist sources.

use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::catalog::SourceDef;
use crate::hosts::{count_domains, parse_content, HostEntry};
use crate::merger::SourceMap;
use crate::utils::{format_bytes, format_count};

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 2000;

/// Some list hosts reject non-browser clients
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Maximum size per source (32 MB)
/// StevenBlack's unified list is around 4 MB
const MAX_SOURCE_SIZE: usize = 32 * 1024 * 1024;

/// Maximum total size for all downloads combined (128 MB)
const MAX_TOTAL_SIZE: usize = 128 * 1024 * 1024;

/// Maximum concurrent HTTP requests to list servers
const MAX_CONCURRENT_REQUESTS: usize = 6;

/// Result of fetching one source
#[derive(Debug)]
pub struct FetchResult {
    pub name: String,
    pub entries: Vec<HostEntry>,
}

/// HTTP client for fetching sources
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    /// Cumulative download size tracker (shared by concurrent fetches)
    total_downloaded: AtomicUsize,
}

impl Fetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
            total_downloaded: AtomicUsize::new(0),
        })
    }

    /// Override the number of attempts per source (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Get the total bytes downloaded so far
    pub fn total_downloaded(&self) -> usize {
        self.total_downloaded.load(Ordering::Relaxed)
    }

    /// Fetch and parse a single source with retry logic
    pub async fn fetch_source(&self, source: &SourceDef) -> Result<FetchResult> {
        info!("Fetching {}...", source.name);

        let content = self
            .fetch_with_retry(&source.url)
            .await
            .with_context(|| format!("Failed to fetch {}", source.name))?;

        let entries = parse_content(&content, &source.name);

        info!(
            "Fetched {}: {} entries, {} domains",
            source.name,
            format_count(entries.len()),
            format_count(count_domains(&entries))
        );

        Ok(FetchResult {
            name: source.name.clone(),
            entries,
        })
    }

    /// Fetch several sources concurrently into a source map.
    ///
    /// A source that fails is logged and stored with no entries, so the map
    /// always has one slot per requested source.
    pub async fn fetch_sources(&self, sources: &[&SourceDef]) -> SourceMap {
        use futures::stream::{self, StreamExt};

        let fetches = sources.iter().map(|source| async move {
            (source.name.clone(), self.fetch_source(source).await)
        });

        let results: Vec<(String, Result<FetchResult>)> = stream::iter(fetches)
            .buffer_unordered(MAX_CONCURRENT_REQUESTS)
            .collect()
            .await;

        let mut map = SourceMap::with_capacity(results.len());
        for (name, result) in results {
            match result {
                Ok(fetched) => {
                    map.insert(fetched.name, fetched.entries);
                }
                Err(e) => {
                    warn!("{:#}", e);
                    map.insert(name, Vec::new());
                }
            }
        }
        map
    }

    /// Fetch content with retry logic and size validation
    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = RETRY_DELAY_MS * (1 << (attempt - 1));
                debug!("Retry {} after {}ms for {}", attempt, delay, url);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    if let Some(content_length) = response.content_length() {
                        self.check_size(content_length as usize)?;
                    }

                    match response.text().await {
                        Ok(body) => {
                            self.check_size(body.len())?;
                            self.record_download(body.len())?;
                            return Ok(body);
                        }
                        Err(e) => {
                            last_error =
                                Some(anyhow::Error::new(e).context("Failed to read response body"));
                        }
                    }
                }
                Ok(response) => {
                    last_error = Some(anyhow::anyhow!("HTTP {}", response.status()));
                }
                Err(e) => {
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Unknown error")))
    }

    /// Reject a body that would exceed the per-source or cumulative limit
    fn check_size(&self, size: usize) -> Result<()> {
        if size > MAX_SOURCE_SIZE {
            anyhow::bail!(
                "Response too large: {} (max: {})",
                format_bytes(size as u64),
                format_bytes(MAX_SOURCE_SIZE as u64)
            );
        }
        let current_total = self.total_downloaded();
        if current_total + size > MAX_TOTAL_SIZE {
            anyhow::bail!(
                "Cumulative download limit exceeded: {} + {} > {}",
                format_bytes(current_total as u64),
                format_bytes(size as u64),
                format_bytes(MAX_TOTAL_SIZE as u64)
            );
        }
        Ok(())
    }

    fn record_download(&self, size: usize) -> Result<()> {
        let new_total = self.total_downloaded.fetch_add(size, Ordering::Relaxed) + size;
        if new_total > MAX_TOTAL_SIZE {
            anyhow::bail!(
                "Cumulative download limit exceeded: {} (max: {})",
                format_bytes(new_total as u64),
                format_bytes(MAX_TOTAL_SIZE as u64)
            );
        }
        Ok(())
    }
}
