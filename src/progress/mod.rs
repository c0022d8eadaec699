//! Progress module containing progress bar functionality.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Coordination of the batch bar and per-job spinners
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::downloader::DownloaderBuilder;
//! use coursefetch::progress::{ProgressBarOpts, StyleOptions};
//!
//! let downloader = DownloaderBuilder::new()
//!     .style_options(StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::spinner()))
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
