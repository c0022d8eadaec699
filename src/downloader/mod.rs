//! Download Orchestrator.
//!
//! This module provides the [`Downloader`] and its builder. Jobs are run
//! sequentially because the session that resolved the media is shared with
//! the fetch, and it cannot serve concurrent navigations.
//!
//! - `downloader` - job sequencing, skip checks and outcome reporting
//! - `builder` - `DownloaderBuilder`
//! - `config` - configuration structures, retry policy and callback types
//! - `retry` - bounded retry around one fetcher
//! - `cleanup` - removal of partial artifacts
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::downloader::DownloaderBuilder;
//! use std::time::Duration;
//!
//! let downloader = DownloaderBuilder::hidden()
//!     .max_attempts(3)
//!     .backoff(Duration::from_secs(2))
//!     .build();
//! assert_eq!(downloader.retry_policy().max_attempts, 3);
//! ```

pub mod builder;
pub mod cleanup;
pub mod config;
pub mod downloader;
pub mod retry;

pub use builder::DownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig, RetryPolicy};
pub use downloader::Downloader;
pub use retry::{fetch_with_retry, RetryOutcome};
