//! Minimal best-effort HTML scanning.
//!
//! Course pages are scanned with a handful of regular expressions and a tag
//! balancer. This is enough to find links, headings and iframes on pages we
//! do not control; it is not a conforming HTML parser.

use regex::Regex;
use std::sync::LazyLock;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<([a-z][a-z0-9]*)\b([^>]*)>").expect("open tag pattern is valid")
});
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(/?)([a-z][a-z0-9]*)\b[^>]*>").expect("tag pattern is valid")
});
static STRIP_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("strip pattern is valid"));
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern is valid")
});
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const VOID_TAGS: [&str; 9] = [
    "area", "br", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// An element located in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Element<'a> {
    pub(crate) name: &'a str,
    pub(crate) attrs: &'a str,
    pub(crate) inner: &'a str,
}

impl<'a> Element<'a> {
    /// Value of the attribute `name`, entity-decoded.
    pub(crate) fn attr(&self, name: &str) -> Option<String> {
        attr(self.attrs, name)
    }

    /// Whether the element has tag name `tag`.
    pub(crate) fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    /// Rendered text of the element, whitespace collapsed.
    pub(crate) fn text(&self) -> String {
        text(self.inner)
    }

    /// Descendants of this element accepted by `pred`.
    pub(crate) fn find(&self, pred: impl Fn(&str, &str) -> bool) -> Vec<Element<'a>> {
        find_elements(self.inner, pred)
    }
}

/// Value of the attribute `name` in a raw attribute string.
///
/// Names match case-insensitively and only as a whole; a bare attribute
/// yields an empty value.
pub(crate) fn attr(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| caps.get(1).is_some_and(|n| n.as_str().eq_ignore_ascii_case(name)))
        .map(|caps| {
            caps.get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default()
        })
}

/// Whether the attribute `name` exists and contains `needle` (case-insensitive).
pub(crate) fn attr_contains(attrs: &str, name: &str, needle: &str) -> bool {
    attr(attrs, name)
        .map(|v| v.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// All elements whose `(tag name, attributes)` are accepted by `pred`, in
/// document order. Nested matches are returned as well.
pub(crate) fn find_elements<'a>(
    html: &'a str,
    pred: impl Fn(&str, &str) -> bool,
) -> Vec<Element<'a>> {
    OPEN_TAG
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            if !pred(name, attrs) {
                return None;
            }
            let inner = if attrs.trim_end().ends_with('/')
                || VOID_TAGS.iter().any(|v| name.eq_ignore_ascii_case(v))
            {
                ""
            } else {
                balanced_inner(html, whole.end(), name)
            };
            Some(Element { name, attrs, inner })
        })
        .collect()
}

/// All elements with tag name `tag`.
pub(crate) fn elements<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
    find_elements(html, |name, _| name.eq_ignore_ascii_case(tag))
}

/// Content from `start` up to the tag closing an element named `name`.
///
/// Unclosed elements run to the end of the document.
fn balanced_inner<'a>(html: &'a str, start: usize, name: &str) -> &'a str {
    let rest = &html[start..];
    let mut depth = 1usize;
    for caps in ANY_TAG.captures_iter(rest) {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        if !tag.as_str().eq_ignore_ascii_case(name) {
            continue;
        }
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return &rest[..whole.start()];
            }
        } else if !whole.as_str().trim_end_matches('>').ends_with('/') {
            depth += 1;
        }
    }
    rest
}

/// Rendered text of an HTML fragment.
pub(crate) fn text(fragment: &str) -> String {
    let stripped = STRIP_TAGS.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
