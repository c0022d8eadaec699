//! Shared utility functions.
//!
//! This module contains helpers used across the pipeline. It currently holds
//! the output naming rules that double as the on-disk state convention read
//! back by the [`reconcile`](crate::reconcile) module.
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::utils::{output_file_name, sanitize_file_name};
//!
//! assert_eq!(sanitize_file_name("A/B: Test?"), "A-B- Test-");
//! assert_eq!(
//!     output_file_name(3, "Lesson 3", "Vue Basics"),
//!     "03-Lesson 3 - Vue Basics.mp4"
//! );
//! ```

pub mod naming;

pub use naming::{
    is_generic_title, output_file_name, sanitize_file_name, COMPLETE_EXTENSION,
    PARTIAL_EXTENSIONS,
};
