//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust,no_run
//! use coursefetch::downloader::DownloaderBuilder;
//! use coursefetch::download::Status;
//! use coursefetch::fetch::YtDlpFetcher;
//! use std::time::Duration;
//!
//! let downloader = DownloaderBuilder::new()
//!     .fetcher(YtDlpFetcher::from_path().expect("yt-dlp not found"))
//!     .max_attempts(3)
//!     .backoff(Duration::from_secs(2))
//!     .on_complete(|summary| {
//!         if let Status::Fail(msg) = summary.status() {
//!             eprintln!("{} failed: {}", summary.job().file_name(), msg);
//!         }
//!     })
//!     .build();
//! ```

use super::config::{DownloaderConfig, RetryPolicy};
use super::downloader::Downloader;
use crate::download::Summary;
use crate::fetch::MediaFetcher;
use crate::{ProgressBarOpts, StyleOptions};

use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use coursefetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().max_attempts(5).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options =
            StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden());
        builder
    }

    /// Set the number of attempts per fetcher, including the first one.
    ///
    /// A value of `0` is treated as `1`.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.retry.max_attempts = max_attempts;
        self
    }

    /// Set the wait before each retry.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.config.retry.backoff = backoff;
        self
    }

    /// Replace the whole retry policy.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the user agent passed to the fetcher.
    ///
    /// Use the user agent of the session that resolved the media, some hosts
    /// refuse player requests from a different client.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    /// Set the container the fetcher merges into.
    pub fn merge_format(mut self, merge_format: &str) -> Self {
        self.config.merge_format = merge_format.to_string();
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set callback for when each job completes, whatever its status.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Set whether to re-fetch outputs that already exist.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Append a fetcher. Fetchers are tried in the order they were added.
    pub fn fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: MediaFetcher + 'static,
    {
        self.config.fetchers.push(Arc::new(fetcher));
        self
    }

    /// Append an already shared fetcher.
    pub fn shared_fetcher(mut self, fetcher: Arc<dyn MediaFetcher>) -> Self {
        self.config.fetchers.push(fetcher);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
