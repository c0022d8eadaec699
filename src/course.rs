//! Course pipeline.
//!
//! Ties the phases together for one course: catalogue, reconciliation gate,
//! resolution, deduplication, job building and the download run. Every phase
//! finishes before the next one starts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use coursefetch::course::download_course;
//! use coursefetch::downloader::DownloaderBuilder;
//! use coursefetch::render::{HttpPageRenderer, RendererConfig};
//! use std::path::Path;
//!
//! # async fn example() -> coursefetch::Result<()> {
//! let mut renderer = HttpPageRenderer::new(RendererConfig::default())?;
//! let downloader = DownloaderBuilder::new().build();
//! let report = download_course(
//!     &mut renderer,
//!     &downloader,
//!     "https://vueschool.io/courses/vuejs-fundamentals",
//!     Path::new("downloads"),
//!     false,
//! )
//! .await?;
//! println!("{} videos processed", report.processed());
//! # Ok(())
//! # }
//! ```

use crate::catalogue::Course;
use crate::dedupe::{dedupe, DiscardedDuplicate};
use crate::download::{build_jobs, Summary};
use crate::downloader::Downloader;
use crate::error::{Error, Result};
use crate::reconcile::{plan, DownloadPlan};
use crate::render::{PageRenderer, WaitPolicy};
use crate::resolve::{MediaResolver, ResolutionFailure};

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

/// What happened to one course.
#[derive(Debug, Clone)]
pub struct CourseReport {
    /// Title of the course.
    pub course_title: String,
    /// Directory the course is written to.
    pub directory: PathBuf,
    /// Lesson count of the catalogue.
    pub expected_count: usize,
    /// Plan computed before any media was resolved.
    pub plan: DownloadPlan,
    /// Lessons whose media could not be determined.
    pub resolution_failures: Vec<ResolutionFailure>,
    /// Lessons dropped because another lesson embeds the same media.
    pub discarded: Vec<DiscardedDuplicate>,
    /// Sequence numbers of the jobs the plan asked for.
    pub queued: Vec<usize>,
    /// One summary per download job.
    pub summaries: Vec<Summary>,
}

impl CourseReport {
    /// Whether the course was skipped because everything was already on disk.
    pub fn is_up_to_date(&self) -> bool {
        self.plan.is_satisfied()
    }

    /// Number of jobs that ended with their output in place.
    pub fn processed(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_success()).count()
    }

    /// Number of jobs that failed.
    pub fn failed(&self) -> usize {
        self.summaries.len() - self.processed()
    }
}

/// Download one course into `output_dir/<course title>`.
///
/// Only session and catalogue failures are returned as errors. Lessons that
/// cannot be resolved or fetched are listed in the report.
pub async fn download_course<R>(
    renderer: &mut R,
    downloader: &Downloader,
    course_url: &str,
    output_dir: &Path,
    force: bool,
) -> Result<CourseReport>
where
    R: PageRenderer + ?Sized,
{
    info!(url = course_url, "Navigating to course");
    renderer
        .navigate(course_url, WaitPolicy::NetworkIdle)
        .await
        .map_err(|e| Error::Session(format!("Cannot open course page {}: {}", course_url, e)))?;

    let raw = renderer.catalogue().await?;
    let course = Course::from_raw(course_url, raw);
    if course.is_empty() {
        return Err(Error::Catalogue(format!(
            "No lessons found on {}",
            course_url
        )));
    }
    info!(title = %course.title, lessons = course.len(), "Course found");

    let directory = output_dir.join(course.directory_name());
    let plan = plan(&directory, course.len(), force).await?;

    let mut report = CourseReport {
        course_title: course.title.clone(),
        directory: directory.clone(),
        expected_count: course.len(),
        plan,
        resolution_failures: Vec::new(),
        discarded: Vec::new(),
        queued: Vec::new(),
        summaries: Vec::new(),
    };

    if report.plan.is_satisfied() {
        return Ok(report);
    }

    let resolution = MediaResolver::new(renderer).resolve_all(&course.lessons).await;
    info!(
        resolved = resolution.resolved.len(),
        failed = resolution.failures.len(),
        "Lessons resolved"
    );
    report.resolution_failures = resolution.failures;

    let deduplicated = dedupe(resolution.resolved);
    report.discarded = deduplicated.discarded;

    let jobs = build_jobs(deduplicated.assets, &course.title, &directory);
    report.queued = jobs
        .iter()
        .map(|job| job.sequence_number)
        .filter(|&n| n > 0 && report.plan.requires(n - 1))
        .collect();
    info!(queued = ?report.queued, "Jobs queued for download");
    fs::create_dir_all(&directory).await?;

    report.summaries = downloader.download(&jobs).await;
    info!(
        title = %report.course_title,
        processed = report.processed(),
        failed = report.failed(),
        "Course finished"
    );
    Ok(report)
}

/// Download every course listed on `<base>/courses`.
///
/// A course that fails as a whole is logged and skipped. Only a failure to
/// read the course listing itself is returned.
pub async fn download_all_courses<R>(
    renderer: &mut R,
    downloader: &Downloader,
    courses_url: &str,
    output_dir: &Path,
    force: bool,
) -> Result<Vec<CourseReport>>
where
    R: PageRenderer + ?Sized,
{
    info!(url = courses_url, "Collecting course list");
    renderer
        .navigate(courses_url, WaitPolicy::NetworkIdle)
        .await
        .map_err(|e| Error::Session(format!("Cannot open course list: {}", e)))?;

    let links = renderer.course_links().await?;
    if links.is_empty() {
        warn!(url = courses_url, "No courses found");
    }
    info!("Found {} courses", links.len());

    let mut reports = Vec::with_capacity(links.len());
    for (i, link) in links.iter().enumerate() {
        info!("Course {}/{}: {}", i + 1, links.len(), link);
        match download_course(renderer, downloader, link, output_dir, force).await {
            Ok(report) => reports.push(report),
            Err(e) => error!(url = %link, "Skipping course: {}", e),
        }
    }
    Ok(reports)
}
