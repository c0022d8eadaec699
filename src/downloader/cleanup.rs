//! Removal of partial artifacts left by the fetcher.

use crate::reconcile::is_partial_artifact;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Suffixes appended to an output path by an interrupted transfer.
pub const PARTIAL_ARTIFACT_SUFFIXES: [&str; 3] = ["part", "ytdl", "temp"];

/// Delete `<output>.part`, `<output>.ytdl` and `<output>.temp` if present.
///
/// Returns the paths that were removed. Missing files are not an error;
/// files that cannot be removed are logged and left in place.
pub async fn remove_partial_artifacts(output_path: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    for suffix in PARTIAL_ARTIFACT_SUFFIXES {
        let mut name: OsString = output_path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        let path = PathBuf::from(name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Deleted temporary file");
                removed.push(path);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), "Could not delete temporary file: {}", e),
        }
    }
    removed
}

/// Partial artifacts in `dir` that belong to the job named `base_name`.
///
/// A file belongs to the job when its name is `base_name` followed by a dot,
/// so `01-Intro` never claims `01-Introduction.mp4.part`.
pub async fn find_stale_partials(dir: &Path, base_name: &str) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if belongs_to(name, base_name) && is_partial_artifact(name) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

/// Delete every partial artifact in `dir` that belongs to `base_name`.
///
/// Fetchers may leave partial files from aborted attempts behind even after
/// a later attempt succeeded.
pub async fn remove_stale_partials(dir: &Path, base_name: &str) -> io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for path in find_stale_partials(dir, base_name).await? {
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Cleaned up incomplete file");
                removed.push(path);
            }
            Err(e) => warn!(path = %path.display(), "Could not clean up incomplete file: {}", e),
        }
    }
    Ok(removed)
}

fn belongs_to(name: &str, base_name: &str) -> bool {
    name.strip_prefix(base_name)
        .is_some_and(|rest| rest.starts_with('.'))
}
