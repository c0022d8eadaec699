//! Local State Reconciler.
//!
//! The output directory is the only persisted state. File names follow the
//! `<NN>-<title>.mp4` convention for finished assets, while the media
//! fetcher leaves `.part`/`.ytdl` files behind for interrupted transfers.
//! Reading those names back tells which lesson indices still need work.
//!
//! The reconciler only classifies files. It never moves or deletes them.
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::reconcile::reconcile;
//!
//! let files = ["01-Intro.mp4", "02-Setup.mp4.part"];
//! let required: Vec<_> = reconcile(files, 3).into_iter().collect();
//! assert_eq!(required, vec![1, 2]);
//! ```

use crate::error::Result;
use crate::utils::{COMPLETE_EXTENSION, PARTIAL_EXTENSIONS};

use regex::Regex;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;
use tracing::{debug, info};

static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-").expect("ordinal prefix pattern is valid"));

/// Leading `NN-` ordinal of a file name.
pub fn parse_ordinal_prefix(name: &str) -> Option<usize> {
    ORDINAL_PREFIX
        .captures(name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether `name` is an interrupted-transfer remnant.
pub fn is_partial_artifact(name: &str) -> bool {
    PARTIAL_EXTENSIONS
        .iter()
        .any(|ext| has_extension(name, ext))
}

/// Whether `name` is a finished asset.
pub fn is_complete_asset(name: &str) -> bool {
    has_extension(name, COMPLETE_EXTENSION)
}

fn has_extension(name: &str, ext: &str) -> bool {
    name.strip_suffix(ext)
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Ordinals found in an output directory, by state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFileState {
    /// Ordinals with a finished asset.
    pub completed_ordinals: BTreeSet<usize>,
    /// Ordinals with at least one interrupted-transfer remnant.
    pub partial_ordinals: BTreeSet<usize>,
}

impl LocalFileState {
    /// Classify a directory listing. Names without an ordinal prefix are ignored.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::default();
        for name in names {
            let name = name.as_ref();
            let Some(ordinal) = parse_ordinal_prefix(name) else {
                continue;
            };
            if is_partial_artifact(name) {
                state.partial_ordinals.insert(ordinal);
            } else if is_complete_asset(name) {
                state.completed_ordinals.insert(ordinal);
            }
        }
        state
    }

    /// Zero-based indices that still need a download, given `expected_count`
    /// lessons.
    ///
    /// A partial remnant always marks its index as required, even when a
    /// finished file with the same ordinal exists.
    pub fn required_indices(&self, expected_count: usize) -> BTreeSet<usize> {
        let partial = self
            .partial_ordinals
            .iter()
            .filter_map(|o| o.checked_sub(1));
        let missing = (1..=expected_count)
            .filter(|o| !self.completed_ordinals.contains(o))
            .map(|o| o - 1);
        partial.chain(missing).collect()
    }
}

/// Zero-based indices, sorted, that still require a download.
pub fn reconcile<I, S>(existing_files: I, expected_count: usize) -> BTreeSet<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    LocalFileState::from_file_names(existing_files).required_indices(expected_count)
}

/// File names in `dir`, or `None` if the directory does not exist.
pub async fn list_file_names(dir: &Path) -> Result<Option<Vec<String>>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(Some(names))
}

/// What a course run has to download.
///
/// Computed once before any download starts and passed along explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    /// Zero-based lesson indices that need work.
    pub required_indices: BTreeSet<usize>,
    /// Reconciliation was bypassed; everything is required.
    pub force_all: bool,
}

impl DownloadPlan {
    /// A plan requiring every lesson, without looking at the disk.
    pub fn force() -> Self {
        Self {
            required_indices: BTreeSet::new(),
            force_all: true,
        }
    }

    /// A plan requiring exactly `required_indices`.
    pub fn from_required(required_indices: BTreeSet<usize>) -> Self {
        Self {
            required_indices,
            force_all: false,
        }
    }

    /// Whether the lesson at `index` needs work.
    pub fn requires(&self, index: usize) -> bool {
        self.force_all || self.required_indices.contains(&index)
    }

    /// Whether nothing needs to be downloaded at all.
    pub fn is_satisfied(&self) -> bool {
        !self.force_all && self.required_indices.is_empty()
    }

    /// Required lessons as 1-based ordinals, for reporting.
    pub fn required_ordinals(&self) -> Vec<usize> {
        self.required_indices.iter().map(|i| i + 1).collect()
    }
}

/// Build the plan for a course whose assets live in `dir`.
///
/// With `force` the directory is not inspected. A missing directory
/// requires every lesson.
pub async fn plan(dir: &Path, expected_count: usize, force: bool) -> Result<DownloadPlan> {
    if force {
        debug!("Forced download, skipping reconciliation");
        return Ok(DownloadPlan::force());
    }

    let Some(names) = list_file_names(dir).await? else {
        info!(dir = %dir.display(), "Course folder not found, starting download");
        return Ok(DownloadPlan::from_required((0..expected_count).collect()));
    };

    info!(dir = %dir.display(), "Course folder found");
    let plan = DownloadPlan::from_required(reconcile(&names, expected_count));
    if plan.is_satisfied() {
        info!("All {} videos already downloaded", expected_count);
    } else {
        info!(
            "Need to download lessons: {}",
            plan.required_ordinals()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(plan)
}
