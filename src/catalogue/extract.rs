//! Ranked extraction strategies for course pages.
//!
//! Course pages are not under our control, so each value is looked up with an
//! ordered list of [`Strategy`]s. The first strategy that yields a non-empty
//! result wins; later ones are never consulted.

use super::html::{self, Element};
use super::lesson::{RawCatalogue, RawLessonEntry, UNKNOWN_COURSE_TITLE};
use crate::error::{Error, Result};

use reqwest::Url;
use tracing::debug;

/// A parsed page together with the URL it was loaded from.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    html: &'a str,
    base: Url,
}

impl<'a> Document<'a> {
    /// Wrap `html` loaded from `page_url`.
    pub fn new(html: &'a str, page_url: &str) -> Result<Self> {
        let base = Url::parse(page_url).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", page_url, e))
        })?;
        Ok(Self { html, base })
    }

    /// Raw markup.
    pub fn html(&self) -> &'a str {
        self.html
    }

    /// Resolve a possibly relative link against the page URL.
    pub fn absolute(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
            return None;
        }
        self.base.join(href).ok().map(String::from)
    }
}

/// A named way of extracting a value from a [`Document`].
pub struct Strategy<T> {
    /// Name used in logs.
    pub name: &'static str,
    extract: fn(&Document<'_>) -> Option<T>,
}

impl<T> Strategy<T> {
    /// Creates a new [`Strategy`].
    pub const fn new(name: &'static str, extract: fn(&Document<'_>) -> Option<T>) -> Self {
        Self { name, extract }
    }

    /// Run the strategy against `doc`.
    pub fn run(&self, doc: &Document<'_>) -> Option<T> {
        (self.extract)(doc)
    }
}

/// Try `strategies` in order and return the first result, with the name of
/// the strategy that produced it.
pub fn first_match<T>(strategies: &[Strategy<T>], doc: &Document<'_>) -> Option<(&'static str, T)> {
    strategies.iter().find_map(|s| s.run(doc).map(|v| (s.name, v)))
}

/// Course title strategies, best first.
pub const TITLE_STRATEGIES: [Strategy<String>; 3] = [
    Strategy::new("h1", title_from_h1),
    Strategy::new("course-header", title_from_course_header),
    Strategy::new("title-class", title_from_title_class),
];

/// Lesson list strategies, best first.
pub const LESSON_STRATEGIES: [Strategy<Vec<RawLessonEntry>>; 3] = [
    Strategy::new("curriculum-section", lessons_from_curriculum),
    Strategy::new("lesson-links", lessons_from_links),
    Strategy::new("lesson-mentions", lessons_from_mentions),
];

/// Run the catalogue-extraction query over a course page.
///
/// The result may have no entries; deciding whether that is fatal is up to
/// the caller.
pub fn extract_catalogue(html: &str, page_url: &str) -> Result<RawCatalogue> {
    let doc = Document::new(html, page_url)?;

    let title = match first_match(&TITLE_STRATEGIES, &doc) {
        Some((name, title)) => {
            debug!(strategy = name, "Course title extracted");
            title
        }
        None => UNKNOWN_COURSE_TITLE.to_string(),
    };

    let entries = match first_match(&LESSON_STRATEGIES, &doc) {
        Some((name, entries)) => {
            debug!(strategy = name, count = entries.len(), "Lesson entries extracted");
            entries
        }
        None => Vec::new(),
    };

    Ok(RawCatalogue { title, entries })
}

/// Collect course page links from a course listing page.
///
/// Links are taken from anchors inside `course-card` elements and must point
/// under `/courses/`. Duplicates are removed, first occurrence wins.
pub fn extract_course_links(html: &str, page_url: &str) -> Result<Vec<String>> {
    let doc = Document::new(html, page_url)?;
    let mut links: Vec<String> = Vec::new();
    let cards = html::find_elements(doc.html(), |_, attrs| {
        html::attr_contains(attrs, "class", "course-card")
    });
    for card in cards {
        let anchors = std::iter::once(card)
            .filter(|c| c.is("a"))
            .chain(html::elements(card.inner, "a"));
        for a in anchors {
            if let Some(url) = a.attr("href").and_then(|h| doc.absolute(&h)) {
                if url.contains("/courses/") && !links.contains(&url) {
                    links.push(url);
                }
            }
        }
    }
    Ok(links)
}

fn non_empty(s: String) -> Option<String> {
    Some(s).filter(|s| !s.is_empty())
}

fn title_from_h1(doc: &Document<'_>) -> Option<String> {
    html::elements(doc.html(), "h1")
        .first()
        .and_then(|e| non_empty(e.text()))
}

fn title_from_course_header(doc: &Document<'_>) -> Option<String> {
    html::find_elements(doc.html(), |_, attrs| {
        html::attr_contains(attrs, "class", "course-header__title")
    })
    .first()
    .and_then(|e| non_empty(e.text()))
}

fn title_from_title_class(doc: &Document<'_>) -> Option<String> {
    html::find_elements(doc.html(), |_, attrs| html::attr_contains(attrs, "class", "title"))
        .first()
        .and_then(|e| non_empty(e.text()))
}

fn lessons_from_curriculum(doc: &Document<'_>) -> Option<Vec<RawLessonEntry>> {
    let section = html::find_elements(doc.html(), |_, attrs| {
        html::attr_contains(attrs, "id", "curriculum")
            || html::attr_contains(attrs, "class", "curriculum")
            || html::attr_contains(attrs, "class", "lessons")
    })
    .into_iter()
    .next()?;

    let entries: Vec<_> = html::elements(section.inner, "li")
        .iter()
        .filter_map(|item| lesson_entry(doc, item))
        .collect();
    Some(entries).filter(|e| !e.is_empty())
}

fn lessons_from_links(doc: &Document<'_>) -> Option<Vec<RawLessonEntry>> {
    let entries: Vec<_> = html::elements(doc.html(), "a")
        .iter()
        .filter(|a| a.attr("href").is_some_and(|h| h.contains("/lessons/")))
        .filter_map(|a| lesson_entry(doc, a))
        .collect();
    Some(entries).filter(|e| !e.is_empty())
}

fn lessons_from_mentions(doc: &Document<'_>) -> Option<Vec<RawLessonEntry>> {
    let entries: Vec<_> = html::elements(doc.html(), "a")
        .iter()
        .filter(|a| a.text().to_lowercase().contains("lesson"))
        .filter_map(|a| lesson_entry(doc, a))
        .collect();
    Some(entries).filter(|e| !e.is_empty())
}

/// Build an entry from a curriculum item or a lesson anchor.
///
/// Items without a usable link are skipped.
fn lesson_entry(doc: &Document<'_>, item: &Element<'_>) -> Option<RawLessonEntry> {
    let href = if item.is("a") {
        item.attr("href")
    } else {
        html::elements(item.inner, "a")
            .first()
            .and_then(|a| a.attr("href"))
    };
    let url = href.and_then(|h| doc.absolute(&h))?;

    let title = [
        item.find(|_, attrs| html::attr_contains(attrs, "class", "title")),
        html::elements(item.inner, "h3"),
        html::elements(item.inner, "h4"),
    ]
    .into_iter()
    .find_map(|found| found.first().map(|e| e.text()))
    .unwrap_or_else(|| item.text());

    let duration = item
        .find(|_, attrs| html::attr_contains(attrs, "class", "duration"))
        .into_iter()
        .chain(html::elements(item.inner, "small"))
        .next()
        .map(|e| e.text())
        .unwrap_or_default();

    Some(RawLessonEntry {
        title,
        url,
        duration,
    })
}
