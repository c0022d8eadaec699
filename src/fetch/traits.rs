//! Traits and types for media fetching.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Everything a fetcher needs to transfer one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Player URL of the media.
    pub media_url: String,
    /// Final path of the merged output file.
    pub output_path: PathBuf,
    /// Lesson page embedding the media, sent as referer.
    pub referer: String,
    /// User agent of the session that resolved the media.
    pub user_agent: String,
    /// Container the fetched streams are merged into.
    pub merge_format: String,
    /// Ignore and overwrite any partial state left by earlier attempts.
    pub force_overwrite: bool,
}

/// A failed fetch attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The fetcher process could not be started.
    #[error("failed to start {tool}: {message}")]
    Spawn {
        /// Name of the fetcher.
        tool: String,
        /// Underlying error.
        message: String,
    },

    /// The fetcher ran and reported a failure.
    #[error("{tool} failed (exit code {code:?}): {message}")]
    Failed {
        /// Name of the fetcher.
        tool: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Last diagnostic line printed by the fetcher.
        message: String,
    },
}

impl FetchError {
    /// Whether the failure looks like a locked or inaccessible file.
    ///
    /// Such failures are usually caused by stale partial files from an earlier
    /// attempt, which are removed before retrying.
    pub fn is_access_error(&self) -> bool {
        let message = match self {
            Self::Spawn { message, .. } | Self::Failed { message, .. } => message,
        };
        message.to_lowercase().contains("access")
    }
}

/// Transfers media to local files.
///
/// Implementations must tolerate being invoked repeatedly for the same
/// output path: a finished transfer is left alone, and an interrupted one can
/// be resumed or overwritten.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Transfer `request.media_url` to `request.output_path`.
    async fn fetch(&self, request: &FetchRequest) -> Result<(), FetchError>;

    /// Name used in logs and summaries.
    fn name(&self) -> &str;
}
