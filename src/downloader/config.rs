//! Configuration structures and defaults for the downloader.
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::downloader::DownloadCallback;
//! use coursefetch::download::{Status, Summary};
//!
//! let callback: DownloadCallback = Box::new(|summary: &Summary| {
//!     match summary.status() {
//!         Status::Success => println!("✓ {}", summary.job().file_name()),
//!         Status::Fail(msg) => println!("✗ {} - {}", summary.job().file_name(), msg),
//!         Status::Skipped(reason) => println!("- {} - {}", summary.job().file_name(), reason),
//!         Status::NotStarted => {}
//!     }
//! });
//! ```

use crate::download::Summary;
use crate::fetch::MediaFetcher;
use crate::render::http::DEFAULT_USER_AGENT;
use crate::StyleOptions;

use std::sync::Arc;
use std::time::Duration;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Attempt budget of a single fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per fetcher, including the first one.
    pub max_attempts: u32,
    /// Fixed wait before every attempt after the first.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Retry budget applied to each fetcher.
    pub retry: RetryPolicy,
    /// User agent forwarded to the fetcher; should match the resolving session.
    pub user_agent: String,
    /// Container format the fetcher merges streams into.
    pub merge_format: String,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Callback for when each job completes.
    pub on_complete: Option<Arc<DownloadCallback>>,
    /// Re-fetch outputs that already exist.
    pub overwrite: bool,
    /// Fetchers in priority order. Later ones are only used once earlier
    /// ones exhausted their retry budget.
    pub fetchers: Vec<Arc<dyn MediaFetcher>>,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("retry", &self.retry)
            .field("user_agent", &self.user_agent)
            .field("merge_format", &self.merge_format)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .field("overwrite", &self.overwrite)
            .field(
                "fetchers",
                &self.fetchers.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            merge_format: "mp4".to_string(),
            style_options: StyleOptions::default(),
            on_complete: None,
            overwrite: false,
            fetchers: Vec::new(),
        }
    }
}
