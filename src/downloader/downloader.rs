//! Core downloader implementation.
//!
//! The [`Downloader`] drives a list of [`DownloadJob`]s strictly one after
//! the other. For each job it skips outputs that already exist with no
//! partial files beside them, runs the configured fetchers under the retry
//! policy, cleans up partial files, and reports a [`Summary`]. A failed job
//! never stops the batch.
//!
//! # Examples
//!
//! ```rust,no_run
//! use coursefetch::downloader::DownloaderBuilder;
//! use coursefetch::download::DownloadJob;
//! use coursefetch::fetch::YtDlpFetcher;
//!
//! # async fn example(jobs: Vec<DownloadJob>) -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .fetcher(YtDlpFetcher::from_path().ok_or("yt-dlp not found")?)
//!     .build();
//!
//! for summary in downloader.download(&jobs).await {
//!     println!("{} - {:?}", summary.job().file_name(), summary.status());
//! }
//! # Ok(())
//! # }
//! ```

use super::cleanup::{find_stale_partials, remove_stale_partials};
use super::config::{DownloaderConfig, RetryPolicy};
use super::retry::fetch_with_retry;
use crate::download::{DownloadJob, Status, Summary};
use crate::fetch::{FetchError, FetchRequest};
use crate::progress::ProgressDisplay;

use futures::stream::{self, StreamExt};
use std::fmt;
use std::fmt::Debug;
use tokio::fs;
use tracing::{debug, error, info, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use coursefetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the retry policy applied to each fetcher.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.config.retry
    }

    /// Gets the user agent passed to the fetcher.
    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }

    /// Gets the merge format passed to the fetcher.
    pub fn merge_format(&self) -> &str {
        &self.config.merge_format
    }

    /// Gets whether existing outputs are fetched again.
    pub fn overwrite(&self) -> bool {
        self.config.overwrite
    }

    /// Names of the configured fetchers, in priority order.
    pub fn fetcher_names(&self) -> Vec<&str> {
        self.config.fetchers.iter().map(|f| f.name()).collect()
    }

    /// Run the jobs in ascending sequence order, one at a time.
    ///
    /// Returns one summary per job, in the same order.
    pub async fn download(&self, jobs: &[DownloadJob]) -> Vec<Summary> {
        let mut ordered: Vec<&DownloadJob> = jobs.iter().collect();
        ordered.sort_by_key(|j| j.sequence_number);

        let progress_display = ProgressDisplay::new(self.config.style_options.clone(), jobs.len());
        let total = ordered.len();

        let summaries = stream::iter(ordered)
            .then(|job| self.fetch(job, total, &progress_display))
            .collect::<Vec<_>>()
            .await;

        progress_display.finish();
        summaries
    }

    /// Process one job.
    async fn fetch(
        &self,
        job: &DownloadJob,
        total: usize,
        progress_display: &ProgressDisplay,
    ) -> Summary {
        let summary = Summary::new(job.clone());
        let file_name = job.file_name();

        info!(
            sequence = job.sequence_number,
            media_id = %job.asset.media_id,
            page = job.source_page_url(),
            "Downloading ({}/{}): {}",
            job.sequence_number,
            total,
            job.title()
        );

        let mut force_overwrite = self.config.overwrite;
        if !force_overwrite && is_file(job).await {
            if has_stale_partials(job).await {
                info!("Partial files found next to {}, downloading again", file_name);
                force_overwrite = true;
            } else {
                info!("File already exists, skipping download: {}", file_name);
                progress_display.increment_main();
                return self.notify(summary.skip("File already exists"));
            }
        }

        if let Err(e) = fs::create_dir_all(job.directory()).await {
            progress_display.increment_main();
            return self.notify(summary.fail(format!("Failed to create directory: {}", e)));
        }

        if self.config.fetchers.is_empty() {
            progress_display.increment_main();
            return self.notify(summary.fail("No media fetcher configured"));
        }

        let spinner = progress_display.start_job(&file_name);
        let request = FetchRequest {
            media_url: job.media_url(),
            output_path: job.output_path.clone(),
            referer: job.source_page_url().to_string(),
            user_agent: self.config.user_agent.clone(),
            merge_format: self.config.merge_format.clone(),
            force_overwrite,
        };

        let mut attempts = 0;
        let mut backoffs = 0;
        let mut last_error: Option<(String, FetchError)> = None;

        for fetcher in &self.config.fetchers {
            let outcome = fetch_with_retry(fetcher.as_ref(), &request, &self.config.retry).await;
            attempts += outcome.attempts;
            backoffs += outcome.backoffs;

            match outcome.result {
                Ok(()) => {
                    info!("✓ Video downloaded: {}", file_name);
                    match remove_stale_partials(job.directory(), &job.base_name()).await {
                        Ok(removed) if !removed.is_empty() => {
                            debug!(count = removed.len(), "Removed stale partial files")
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Could not clean up some temporary files: {}", e),
                    }
                    progress_display.finish_job(spinner);
                    return self.notify(
                        summary
                            .with_attempts(attempts, backoffs)
                            .with_fetcher(fetcher.name())
                            .with_status(Status::Success),
                    );
                }
                Err(e) => {
                    warn!(fetcher = fetcher.name(), "Fetcher gave up: {}", e);
                    last_error = Some((fetcher.name().to_string(), e));
                }
            }
        }

        error!(page = job.source_page_url(), "Could not download the video: {}", file_name);
        progress_display.finish_job(spinner);
        let summary = summary.with_attempts(attempts, backoffs);
        let summary = match last_error {
            Some((name, e)) => summary.with_fetcher(&name).fail(e),
            None => summary.fail("No fetch attempt was made"),
        };
        self.notify(summary)
    }

    /// Call the completion callback, if any, and hand the summary back.
    fn notify(&self, summary: Summary) -> Summary {
        if let Some(ref callback) = self.config.on_complete {
            callback(&summary);
        }
        summary
    }
}

async fn has_stale_partials(job: &DownloadJob) -> bool {
    find_stale_partials(job.directory(), &job.base_name())
        .await
        .is_ok_and(|found| !found.is_empty())
}

async fn is_file(job: &DownloadJob) -> bool {
    fs::metadata(&job.output_path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
