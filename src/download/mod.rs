//! Download jobs and their outcomes.
//!
//! - [`job`] - `DownloadJob` and the numbering of deduplicated assets
//! - [`summary`] - per-job `Summary` and `Status`
//!
//! # Examples
//!
//! ## Building jobs
//!
//! ```rust
//! use coursefetch::catalogue::Lesson;
//! use coursefetch::dedupe::dedupe;
//! use coursefetch::download::build_jobs;
//! use coursefetch::resolve::ResolvedMedia;
//! use std::path::Path;
//!
//! let resolved = vec![
//!     ResolvedMedia::new(Lesson::new(1, "Intro", "https://example.com/lessons/1"), "11"),
//!     ResolvedMedia::new(Lesson::new(2, "Lesson 2", "https://example.com/lessons/2"), "22"),
//! ];
//! let jobs = build_jobs(dedupe(resolved).assets, "Vue Basics", Path::new("out"));
//! assert_eq!(jobs[1].file_name(), "02-Lesson 2 - Vue Basics.mp4");
//! ```
//!
//! ## Working with job status
//!
//! ```rust
//! use coursefetch::download::{Status, Summary};
//! # use coursefetch::download::DownloadJob;
//! # fn example(job: DownloadJob) {
//! let summary = Summary::new(job).fail("fetcher exited with code 1");
//!
//! match summary.status() {
//!     Status::Success => println!("Downloaded"),
//!     Status::Fail(msg) => println!("Failed: {}", msg),
//!     Status::Skipped(reason) => println!("Skipped: {}", reason),
//!     Status::NotStarted => println!("Not started"),
//! }
//! # }
//! ```

pub mod job;
pub mod summary;

pub use job::{build_jobs, DownloadJob};
pub use summary::{Status, Summary};
