//! Bounded retry around a single fetcher.

use super::cleanup::remove_partial_artifacts;
use super::config::RetryPolicy;
use crate::fetch::{FetchError, FetchRequest, MediaFetcher};

use tokio::time::sleep;
use tracing::{error, info};

/// Result of running one fetcher under a [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOutcome {
    /// Success, or the error of the last attempt.
    pub result: Result<(), FetchError>,
    /// Attempts made.
    pub attempts: u32,
    /// Backoff waits performed.
    pub backoffs: u32,
}

/// Run `fetcher` until it succeeds or `policy` is exhausted.
///
/// Every attempt after the first waits `policy.backoff` and asks the fetcher
/// to overwrite partial state. When an attempt fails with an access error,
/// the partial artifacts of the output path are removed before the next one.
pub async fn fetch_with_retry(
    fetcher: &dyn MediaFetcher,
    request: &FetchRequest,
    policy: &RetryPolicy,
) -> RetryOutcome {
    let max_attempts = policy.max_attempts.max(1);
    let mut request = request.clone();
    let mut backoffs = 0;
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        if attempt > 1 {
            info!(
                attempt,
                "Waiting {} ms before retry",
                policy.backoff.as_millis()
            );
            sleep(policy.backoff).await;
            backoffs += 1;
            request.force_overwrite = true;
        }

        info!(
            fetcher = fetcher.name(),
            "Attempting to download (attempt {}/{}): {}",
            attempt,
            max_attempts,
            request.media_url
        );

        match fetcher.fetch(&request).await {
            Ok(()) => {
                return RetryOutcome {
                    result: Ok(()),
                    attempts: attempt,
                    backoffs,
                }
            }
            Err(e) => {
                error!(attempt, "Error in attempt {}: {}", attempt, e);
                if e.is_access_error() {
                    info!("File access error detected, cleaning up temporary files");
                    remove_partial_artifacts(&request.output_path).await;
                }
                last_error = Some(e);
            }
        }
    }

    info!(fetcher = fetcher.name(), "Retries exhausted");
    RetryOutcome {
        result: Err(last_error.unwrap_or_else(|| FetchError::Failed {
            tool: fetcher.name().to_string(),
            code: None,
            message: "no attempt was made".to_string(),
        })),
        attempts: max_attempts,
        backoffs,
    }
}
