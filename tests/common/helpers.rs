#![allow(dead_code)]

use async_trait::async_trait;
use coursefetch::catalogue::{extract_catalogue, extract_course_links, RawCatalogue};
use coursefetch::dedupe::CanonicalAsset;
use coursefetch::download::{build_jobs, DownloadJob};
use coursefetch::downloader::DownloaderBuilder;
use coursefetch::fetch::{FetchError, FetchRequest, MediaFetcher};
use coursefetch::progress::{ProgressBarOpts, StyleOptions};
use coursefetch::render::{find_media_source, Credentials, PageRenderer, WaitPolicy};
use coursefetch::resolve::ResolvedMedia;
use coursefetch::{Error, Lesson, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

// Common test constants
pub const BASE_URL: &str = "https://vueschool.io";
pub const TEST_USER_AGENT: &str = "coursefetch-test-agent";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Sorted names of the files in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| e.expect("Bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

// === Site Fixtures ===

pub fn course_url(slug: &str) -> String {
    format!("{}/courses/{}", BASE_URL, slug)
}

pub fn lesson_url(slug: &str) -> String {
    format!("{}/lessons/{}", BASE_URL, slug)
}

/// Course page markup listing `(title, lesson slug)` pairs
pub fn course_page(title: &str, lessons: &[(&str, &str)]) -> String {
    let items: String = lessons
        .iter()
        .map(|(lesson, slug)| {
            format!(
                r#"<li><a href="/lessons/{}"><h3>{}</h3></a><span class="duration">3:00</span></li>"#,
                slug, lesson
            )
        })
        .collect();
    format!(
        r#"<html><body><h1>{}</h1><section id="curriculum"><ul>{}</ul></section></body></html>"#,
        title, items
    )
}

/// Lesson page markup embedding the player for `media_id`
pub fn lesson_page(media_id: &str) -> String {
    format!(
        r#"<html><body><div class="player"><iframe src="https://player.vimeo.com/video/{}?h=abc" allowfullscreen></iframe></div></body></html>"#,
        media_id
    )
}

/// Course listing markup linking to `slugs`
pub fn courses_page(slugs: &[&str]) -> String {
    slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<div class="course-card"><a href="/courses/{}">{}</a></div>"#,
                slug, slug
            )
        })
        .collect()
}

/// An in-memory site served through the [`PageRenderer`] interface
#[derive(Debug, Default)]
pub struct FakeRenderer {
    pages: HashMap<String, String>,
    current: Option<String>,
    pub visited: Vec<String>,
    pub logged_in: bool,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Adds a course page and one lesson page per `(title, slug, media id)`
    pub fn with_course(mut self, slug: &str, title: &str, lessons: &[(&str, &str, &str)]) -> Self {
        let listing: Vec<(&str, &str)> = lessons.iter().map(|(t, s, _)| (*t, *s)).collect();
        self = self.with_page(&course_url(slug), &course_page(title, &listing));
        for (_, lesson_slug, media_id) in lessons {
            self = self.with_page(&lesson_url(lesson_slug), &lesson_page(media_id));
        }
        self
    }

    fn html(&self) -> Result<(&str, &str)> {
        let url = self
            .current
            .as_deref()
            .ok_or_else(|| Error::Render("No page has been loaded".into()))?;
        let html = self.pages.get(url).map(String::as_str).unwrap_or_default();
        Ok((url, html))
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        if credentials.password == "secret" {
            self.logged_in = true;
            Ok(())
        } else {
            Err(Error::Session("Login rejected".into()))
        }
    }

    async fn navigate(&mut self, url: &str, _wait: WaitPolicy) -> Result<()> {
        self.visited.push(url.to_string());
        if !self.pages.contains_key(url) {
            return Err(Error::Render(format!("404 Not Found: {}", url)));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_deref()
    }

    async fn catalogue(&mut self) -> Result<RawCatalogue> {
        let (url, html) = self.html()?;
        extract_catalogue(html, url)
    }

    async fn media_source(&mut self) -> Result<Option<String>> {
        let (_, html) = self.html()?;
        Ok(find_media_source(html))
    }

    async fn course_links(&mut self) -> Result<Vec<String>> {
        let (url, html) = self.html()?;
        extract_course_links(html, url)
    }

    fn user_agent(&self) -> &str {
        TEST_USER_AGENT
    }
}

// === Fetchers ===

/// A fetcher that fails a fixed number of times per output, then writes it
#[derive(Debug)]
pub struct ScriptedFetcher {
    name: String,
    failures: usize,
    message: String,
    only_media: Option<String>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetcher {
    pub fn succeeding(name: &str) -> Self {
        Self::failing_times(name, 0, "")
    }

    pub fn failing_times(name: &str, failures: usize, message: &str) -> Self {
        Self {
            name: name.to_string(),
            failures,
            message: message.to_string(),
            only_media: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request for `media_id` and succeeds for the others
    pub fn failing_for(name: &str, media_id: &str, message: &str) -> Self {
        Self {
            only_media: Some(format!("/video/{}", media_id)),
            ..Self::always_failing(name, message)
        }
    }

    pub fn always_failing(name: &str, message: &str) -> Self {
        Self::failing_times(name, usize::MAX, message)
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().expect("Poisoned").clone()
    }
}

#[async_trait]
impl MediaFetcher for ScriptedFetcher {
    async fn fetch(&self, request: &FetchRequest) -> std::result::Result<(), FetchError> {
        let previous = {
            let mut requests = self.requests.lock().expect("Poisoned");
            let previous = requests
                .iter()
                .filter(|r| r.output_path == request.output_path)
                .count();
            requests.push(request.clone());
            previous
        };

        let targeted = self
            .only_media
            .as_ref()
            .map_or(true, |suffix| request.media_url.ends_with(suffix.as_str()));
        if targeted && previous < self.failures {
            return Err(FetchError::Failed {
                tool: self.name.clone(),
                code: Some(1),
                message: self.message.clone(),
            });
        }

        fs::write(&request.output_path, b"video").map_err(|e| FetchError::Failed {
            tool: self.name.clone(),
            code: None,
            message: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// === Job Helpers ===

pub fn resolved(ordinal: usize, title: &str, media_id: &str) -> ResolvedMedia {
    ResolvedMedia::new(
        Lesson::new(ordinal, title, &lesson_url(&format!("l{}", ordinal))),
        media_id,
    )
}

/// One job per `(title, media id)`, numbered in order
pub fn create_test_jobs(dir: &Path, lessons: &[(&str, &str)]) -> Vec<DownloadJob> {
    let assets: Vec<CanonicalAsset> = lessons
        .iter()
        .enumerate()
        .map(|(i, (title, id))| CanonicalAsset::from(resolved(i + 1, title, id)))
        .collect();
    build_jobs(assets, "Vue Basics", dir)
}

// === Downloader Builder Helpers ===

/// A quiet downloader builder without backoff waits
pub fn create_test_downloader_builder() -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .backoff(Duration::ZERO)
        .user_agent(TEST_USER_AGENT)
}

// === Progress Bar Helpers ===

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(
        Some(template.to_string()),
        Some(chars.to_string()),
        true,
        false,
    )
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}
