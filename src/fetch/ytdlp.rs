//! Fetcher running the external `yt-dlp` binary.

use super::traits::{FetchError, FetchRequest, MediaFetcher};

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

const TOOL: &str = "yt-dlp";

/// Media fetcher backed by `yt-dlp`.
///
/// # Examples
///
/// ```no_run
/// use coursefetch::fetch::YtDlpFetcher;
/// use std::path::PathBuf;
///
/// // Explicit location
/// let fetcher = YtDlpFetcher::new(PathBuf::from("/usr/local/bin/yt-dlp"));
///
/// // Or auto-discover from PATH
/// let fetcher = YtDlpFetcher::from_path().expect("yt-dlp not found in PATH");
/// ```
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary_path: PathBuf,
}

impl YtDlpFetcher {
    /// Create a fetcher with an explicit binary path.
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find `yt-dlp` in PATH.
    pub fn from_path() -> Option<Self> {
        which::which(TOOL).ok().map(Self::new)
    }

    /// Path of the binary this fetcher runs.
    pub fn binary_path(&self) -> &PathBuf {
        &self.binary_path
    }

    /// Command line arguments for `request`.
    pub fn args(request: &FetchRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--merge-output-format".into(),
            request.merge_format.clone().into(),
            "--referer".into(),
            request.referer.clone().into(),
            "--add-header".into(),
            format!("Referer: {}", request.referer).into(),
            "--user-agent".into(),
            request.user_agent.clone().into(),
            "-o".into(),
            request.output_path.clone().into_os_string(),
        ];
        if request.force_overwrite {
            args.push("--force-overwrites".into());
        }
        args.push(request.media_url.clone().into());
        args
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<(), FetchError> {
        debug!(
            binary = %self.binary_path.display(),
            output = %request.output_path.display(),
            force_overwrite = request.force_overwrite,
            "Running fetcher"
        );
        let output = Command::new(&self.binary_path)
            .args(Self::args(request))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| FetchError::Spawn {
                tool: TOOL.to_string(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("no diagnostic output")
            .to_string();
        Err(FetchError::Failed {
            tool: TOOL.to_string(),
            code: output.status.code(),
            message,
        })
    }

    fn name(&self) -> &str {
        TOOL
    }
}
