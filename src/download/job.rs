//! Download jobs.

use crate::dedupe::CanonicalAsset;
use crate::utils::{output_file_name, COMPLETE_EXTENSION};

use std::path::{Path, PathBuf};

/// One asset to download, with its position in the output folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    /// The deduplicated asset.
    pub asset: CanonicalAsset,
    /// Dense 1-based position among the course's assets.
    ///
    /// Unlike `asset.original_ordinal` this ignores lessons that were
    /// dropped as duplicates or could not be resolved.
    pub sequence_number: usize,
    /// Destination of the finished file.
    pub output_path: PathBuf,
}

impl DownloadJob {
    /// File name of the finished output.
    pub fn file_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without the completed-asset extension.
    ///
    /// Partial files left by the fetcher start with this name.
    pub fn base_name(&self) -> String {
        let name = self.file_name();
        name.strip_suffix(&format!(".{}", COMPLETE_EXTENSION))
            .map(str::to_string)
            .unwrap_or(name)
    }

    /// Directory the output is written to.
    pub fn directory(&self) -> &Path {
        self.output_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Lesson page embedding the media.
    pub fn source_page_url(&self) -> &str {
        &self.asset.media.lesson.source_page_url
    }

    /// Player URL handed to the fetcher.
    pub fn media_url(&self) -> String {
        self.asset.media.media_url()
    }

    /// Title the asset is saved under.
    pub fn title(&self) -> &str {
        &self.asset.chosen_title
    }
}

/// Number `assets` densely in original-ordinal order and place them in
/// `directory`.
pub fn build_jobs(
    mut assets: Vec<CanonicalAsset>,
    course_title: &str,
    directory: &Path,
) -> Vec<DownloadJob> {
    assets.sort_by_key(|a| a.original_ordinal);
    assets
        .into_iter()
        .enumerate()
        .map(|(i, asset)| {
            let sequence_number = i + 1;
            let file_name = output_file_name(sequence_number, &asset.chosen_title, course_title);
            DownloadJob {
                output_path: directory.join(file_name),
                sequence_number,
                asset,
            }
        })
        .collect()
}
