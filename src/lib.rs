//! Coursefetch downloads the videos of an online course into a local folder,
//! resuming where an earlier run stopped.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use coursefetch::course::download_course;
//! use coursefetch::fetch::YtDlpFetcher;
//! use coursefetch::render::{HttpPageRenderer, RendererConfig};
//! use coursefetch::{DownloaderBuilder, Error, PageRenderer};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let mut renderer = HttpPageRenderer::new(RendererConfig::default())?;
//! let fetcher = YtDlpFetcher::from_path()
//!     .ok_or_else(|| Error::ExternalTool("yt-dlp not found".into()))?;
//! let downloader = DownloaderBuilder::new()
//!     .user_agent(renderer.user_agent())
//!     .fetcher(fetcher)
//!     .build();
//!
//! let course = "https://vueschool.io/courses/vuejs-fundamentals";
//! download_course(&mut renderer, &downloader, course, Path::new("downloads"), false).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`catalogue`] - Lessons and courses, and their extraction from course pages
//! - [`render`] - The `PageRenderer` session abstraction and its HTTP implementation
//! - [`resolve`] - Mapping lesson pages to media identifiers
//! - [`dedupe`] - Collapsing lessons that embed the same media
//! - [`reconcile`] - Comparing the output folder with the catalogue
//! - [`download`] - Download jobs and their summaries
//! - [`downloader`] - The `Downloader` and `DownloaderBuilder` running the jobs
//! - [`fetch`] - The `MediaFetcher` abstraction and the yt-dlp implementation
//! - [`course`] - The per-course pipeline
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction
//! - [`progress`] - Progress bar styling and display management
//! - [`utils`] - Output file naming

pub mod catalogue;
pub mod course;
pub mod dedupe;
pub mod download;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod http;
pub mod progress;
pub mod reconcile;
pub mod render;
pub mod resolve;
pub mod utils;

pub use catalogue::{Course, Lesson};
pub use course::{download_all_courses, download_course, CourseReport};
pub use dedupe::{dedupe, CanonicalAsset};
pub use download::{build_jobs, DownloadJob, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder, RetryPolicy};
pub use error::{Error, Result};
pub use fetch::{FetchError, FetchRequest, MediaFetcher, YtDlpFetcher};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use reconcile::{reconcile, DownloadPlan};
pub use render::{Credentials, PageRenderer, WaitPolicy};
pub use resolve::{MediaResolver, ResolvedMedia};
