//! Lesson and course values.

use crate::utils::{is_generic_title, sanitize_file_name};

/// Title used when a course page has no recognizable heading.
pub const UNKNOWN_COURSE_TITLE: &str = "Unknown Course";

/// One entry of a course's curriculum, as returned by the catalogue query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLessonEntry {
    /// Visible title text, possibly empty.
    pub title: String,
    /// Absolute URL of the lesson page, possibly empty.
    pub url: String,
    /// Duration text as displayed, possibly empty.
    pub duration: String,
}

impl RawLessonEntry {
    /// Creates an entry without duration.
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            duration: String::new(),
        }
    }
}

/// Structured result of the catalogue-extraction query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCatalogue {
    /// Course title.
    pub title: String,
    /// Lesson entries in page order.
    pub entries: Vec<RawLessonEntry>,
}

/// A lesson of a course.
///
/// Immutable once extracted for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    /// 1-based position in the course, stable within a run.
    pub ordinal: usize,
    /// Lesson title.
    pub title: String,
    /// URL of the page embedding the lesson's media.
    pub source_page_url: String,
    /// Displayed duration, if the catalogue showed one.
    pub duration: Option<String>,
}

impl Lesson {
    /// Creates a new [`Lesson`].
    pub fn new(ordinal: usize, title: &str, source_page_url: &str) -> Self {
        Self {
            ordinal,
            title: title.to_string(),
            source_page_url: source_page_url.to_string(),
            duration: None,
        }
    }

    /// Zero-based index of the lesson in its course.
    pub fn index(&self) -> usize {
        self.ordinal - 1
    }
}

/// A course and its ordered lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Course title.
    pub title: String,
    /// URL of the course page.
    pub url: String,
    /// Lessons in curriculum order; `lessons[i].ordinal == i + 1`.
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Normalize a raw catalogue into a [`Course`].
    ///
    /// Entries without a URL are dropped. Ordinals are assigned densely over
    /// the remaining entries. Empty titles and titles that only say
    /// `lesson <n>` are rewritten to `Lesson <ordinal>`.
    pub fn from_raw(url: &str, raw: RawCatalogue) -> Self {
        let title = match raw.title.trim() {
            "" => UNKNOWN_COURSE_TITLE.to_string(),
            t => t.to_string(),
        };

        let lessons = raw
            .entries
            .into_iter()
            .filter(|e| !e.url.trim().is_empty())
            .enumerate()
            .map(|(i, e)| {
                let ordinal = i + 1;
                let trimmed = e.title.trim();
                let title = if trimmed.is_empty() || is_generic_title(trimmed) {
                    format!("Lesson {}", ordinal)
                } else {
                    trimmed.to_string()
                };
                let duration = Some(e.duration.trim().to_string()).filter(|d| !d.is_empty());
                Lesson {
                    ordinal,
                    title,
                    source_page_url: e.url.trim().to_string(),
                    duration,
                }
            })
            .collect();

        Self {
            title,
            url: url.to_string(),
            lessons,
        }
    }

    /// Name of the directory holding this course's assets.
    pub fn directory_name(&self) -> String {
        sanitize_file_name(&self.title)
    }

    /// Number of lessons in the catalogue.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the catalogue has no lessons.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}
