//! Progress display for a batch of download jobs.
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::progress::{ProgressDisplay, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::default(), 3);
//! let spinner = display.start_job("01-Intro.mp4");
//! spinner.set_message("01-Intro.mp4 (attempt 2/3)");
//! display.finish_job(spinner);
//! display.finish();
//! ```

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::time::Duration;

/// Progress display manager that coordinates the batch bar and job spinners.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: MultiProgress,
    /// Bar counting finished jobs.
    main: ProgressBar,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a new progress display for `total_jobs` jobs.
    pub fn new(style_options: StyleOptions, total_jobs: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let main = multi.add(
            style_options
                .main()
                .clone()
                .to_progress_bar(total_jobs as u64),
        );
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Get the main progress bar.
    pub fn main(&self) -> &ProgressBar {
        &self.main
    }

    /// Show a spinner for a job that is starting.
    pub fn start_job(&self, label: &str) -> ProgressBar {
        let spinner = self
            .multi
            .add(self.style_options.child().clone().to_spinner());
        spinner.set_message(label.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    /// Finish a job spinner and advance the main bar.
    pub fn finish_job(&self, spinner: ProgressBar) {
        if self.style_options.child().clear {
            spinner.finish_and_clear();
        } else {
            spinner.finish();
        }
        self.main.inc(1);
    }

    /// Advance the main bar for a job that needed no spinner.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Finish the progress display, clearing or keeping the main bar based on
    /// configuration.
    pub fn finish(self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}
