//! Media Resolver Adapter.
//!
//! Maps each lesson to the canonical identifier of the video embedded in its
//! page. A lesson that cannot be resolved is not an error for the run: it is
//! reported as a [`ResolutionFailure`] and left out of the download set.
//! Resolution is never retried; a missing player is a property of the page,
//! not a transient fault.

use crate::catalogue::Lesson;
use crate::render::{PageRenderer, WaitPolicy};
use crate::utils::is_generic_title;

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

static MEDIA_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"video/(\d+)").expect("media id pattern is valid"));

/// A lesson together with the media it embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    /// The lesson that embeds the media.
    pub lesson: Lesson,
    /// Canonical media identifier, e.g. a numeric video host id.
    pub media_id: String,
    /// Whether the lesson title is a `Lesson N` placeholder.
    pub is_generic_title: bool,
}

impl ResolvedMedia {
    /// Creates a new [`ResolvedMedia`].
    pub fn new(lesson: Lesson, media_id: &str) -> Self {
        let is_generic_title = is_generic_title(&lesson.title);
        Self {
            lesson,
            media_id: media_id.to_string(),
            is_generic_title,
        }
    }

    /// Player URL handed to the media fetcher.
    pub fn media_url(&self) -> String {
        media_url(&self.media_id)
    }
}

/// Why a lesson could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionReason {
    /// The lesson page could not be loaded or queried.
    Navigation(String),
    /// The page has no embedded player.
    NoMediaMarker,
    /// The player source does not carry a media id.
    UnparseableId(String),
}

impl fmt::Display for ResolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigation(msg) => write!(f, "page could not be loaded: {}", msg),
            Self::NoMediaMarker => write!(f, "no embedded player found"),
            Self::UnparseableId(src) => write!(f, "no media id in player source \"{}\"", src),
        }
    }
}

/// A lesson that was dropped because its media could not be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    /// The dropped lesson.
    pub lesson: Lesson,
    /// What went wrong.
    pub reason: ResolutionReason,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lesson {} \"{}\": {}",
            self.lesson.ordinal, self.lesson.title, self.reason
        )
    }
}

/// Extract the media id from a player source URL.
pub fn parse_media_id(source: &str) -> Option<String> {
    MEDIA_ID
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical player URL for `media_id`.
pub fn media_url(media_id: &str) -> String {
    format!("https://player.vimeo.com/video/{}", media_id)
}

/// Resolves lessons through a [`PageRenderer`].
pub struct MediaResolver<'r, R: PageRenderer + ?Sized> {
    renderer: &'r mut R,
}

impl<'r, R: PageRenderer + ?Sized> MediaResolver<'r, R> {
    /// Creates a resolver driving `renderer`.
    pub fn new(renderer: &'r mut R) -> Self {
        Self { renderer }
    }

    /// Resolve one lesson. Navigates the renderer to the lesson page.
    pub async fn resolve(&mut self, lesson: &Lesson) -> Result<ResolvedMedia, ResolutionFailure> {
        let fail = |reason| ResolutionFailure {
            lesson: lesson.clone(),
            reason,
        };

        self.renderer
            .navigate(&lesson.source_page_url, WaitPolicy::NetworkIdle)
            .await
            .map_err(|e| fail(ResolutionReason::Navigation(e.to_string())))?;

        let source = self
            .renderer
            .media_source()
            .await
            .map_err(|e| fail(ResolutionReason::Navigation(e.to_string())))?
            .ok_or_else(|| fail(ResolutionReason::NoMediaMarker))?;

        let media_id =
            parse_media_id(&source).ok_or_else(|| fail(ResolutionReason::UnparseableId(source)))?;

        debug!(ordinal = lesson.ordinal, media_id = %media_id, "Lesson resolved");
        Ok(ResolvedMedia::new(lesson.clone(), &media_id))
    }

    /// Resolve every lesson in order.
    ///
    /// All lessons are attempted before returning, so callers always see the
    /// complete resolution set.
    pub async fn resolve_all(&mut self, lessons: &[Lesson]) -> Resolution {
        let mut resolution = Resolution::default();
        for lesson in lessons {
            match self.resolve(lesson).await {
                Ok(media) => resolution.resolved.push(media),
                Err(failure) => {
                    warn!(ordinal = lesson.ordinal, "Could not resolve {}", failure);
                    resolution.failures.push(failure);
                }
            }
        }
        resolution
    }
}

/// Outcome of resolving a list of lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Lessons with a media id, in input order.
    pub resolved: Vec<ResolvedMedia>,
    /// Lessons that were dropped, in input order.
    pub failures: Vec<ResolutionFailure>,
}
