//! Output naming rules.
//!
//! Completed assets are stored as `<NN>-<sanitized title>.mp4`, where `NN` is
//! the job sequence number padded to two digits. The same convention is parsed
//! back by the reconciler, so any change here changes how prior runs are read.

use regex::Regex;
use std::sync::LazyLock;

/// Extension of a completed asset.
pub const COMPLETE_EXTENSION: &str = "mp4";

/// Suffixes the media fetcher leaves behind for an interrupted transfer.
pub const PARTIAL_EXTENSIONS: [&str; 2] = ["part", "ytdl"];

/// Characters that are not allowed in a file name component.
const FORBIDDEN: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

static GENERIC_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^lesson\s+\d+$").expect("generic title pattern is valid"));

/// Whether `title` is a placeholder of the form `Lesson N`.
pub fn is_generic_title(title: &str) -> bool {
    GENERIC_TITLE.is_match(title)
}

/// Replace every forbidden character with `-`, one for one.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN.contains(&c) { '-' } else { c })
        .collect()
}

/// Build the file name of the asset with the given sequence number.
///
/// Generic `Lesson N` titles get the course title appended so files from
/// different courses can be told apart.
pub fn output_file_name(sequence_number: usize, title: &str, course_title: &str) -> String {
    let title = if is_generic_title(title) {
        format!("{} - {}", title, course_title)
    } else {
        title.to_string()
    };
    format!(
        "{:02}-{}.{}",
        sequence_number,
        sanitize_file_name(&title),
        COMPLETE_EXTENSION
    )
}
