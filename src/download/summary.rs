//! Download summary functionality.
//!
//! A [`Summary`] records what happened to one [`DownloadJob`]: its final
//! [`Status`], how many fetch attempts were made, how many backoff waits
//! preceded them, and which fetcher produced the result.
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::download::{DownloadJob, Status, Summary};
//!
//! # fn example(job: DownloadJob) {
//! let summary = Summary::new(job)
//!     .with_attempts(3, 2)
//!     .with_status(Status::Success);
//!
//! assert_eq!(summary.attempts(), 3);
//! assert!(summary.is_success());
//! # }
//! ```

use super::job::DownloadJob;

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Download was skipped with reason
    Skipped(String),
    /// Download completed successfully
    Success,
}

/// Represents a [`DownloadJob`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// The job this summary is about.
    job: DownloadJob,
    /// Status.
    status: Status,
    /// Fetch attempts made, across all fetchers.
    attempts: u32,
    /// Backoff waits performed before retries.
    backoffs: u32,
    /// Name of the fetcher that produced the final status.
    fetcher: Option<String>,
}

impl Summary {
    /// Create a new [`DownloadJob`] [`Summary`].
    pub fn new(job: DownloadJob) -> Self {
        Self {
            job,
            status: Status::NotStarted,
            attempts: 0,
            backoffs: 0,
            fetcher: None,
        }
    }

    /// Attach a status to the summary.
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Attach attempt and backoff counts to the summary.
    pub fn with_attempts(self, attempts: u32, backoffs: u32) -> Self {
        Self {
            attempts,
            backoffs,
            ..self
        }
    }

    /// Attach the name of the fetcher that produced the result.
    pub fn with_fetcher(self, fetcher: &str) -> Self {
        Self {
            fetcher: Some(fetcher.to_string()),
            ..self
        }
    }

    /// Get a reference to the summary's job.
    pub fn job(&self) -> &DownloadJob {
        &self.job
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Number of fetch attempts made.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Number of backoff waits performed.
    pub fn backoffs(&self) -> u32 {
        self.backoffs
    }

    /// Name of the fetcher that produced the result, if any ran.
    pub fn fetcher(&self) -> Option<&str> {
        self.fetcher.as_deref()
    }

    /// Whether the job ended with its output in place.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Status::Success | Status::Skipped(_))
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }

    /// Mark the summary as skipped with a message.
    pub fn skip(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Skipped(format!("{}", msg)),
            ..self
        }
    }
}
