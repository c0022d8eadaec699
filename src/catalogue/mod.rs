//! Course catalogue model and extraction.
//!
//! A course page is turned into a [`RawCatalogue`] by the page renderer, then
//! normalized into a [`Course`] whose [`Lesson`]s carry stable 1-based
//! ordinals for the rest of the run.
//!
//! # Overview
//!
//! - [`lesson`] - `Lesson`, `Course` and the raw catalogue shapes
//! - [`extract`] - ranked extraction strategies over a course page document
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::catalogue::{Course, RawCatalogue, RawLessonEntry};
//!
//! let raw = RawCatalogue {
//!     title: "Vue Basics".into(),
//!     entries: vec![
//!         RawLessonEntry::new("", "https://example.com/lessons/a"),
//!         RawLessonEntry::new("Reactivity", "https://example.com/lessons/b"),
//!     ],
//! };
//! let course = Course::from_raw("https://example.com/courses/vue", raw);
//! assert_eq!(course.lessons[0].title, "Lesson 1");
//! assert_eq!(course.lessons[1].ordinal, 2);
//! ```

pub mod extract;
pub(crate) mod html;
pub mod lesson;

pub use extract::{extract_catalogue, extract_course_links, Document, Strategy};
pub use lesson::{Course, Lesson, RawCatalogue, RawLessonEntry};
