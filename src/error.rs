//! Error handling for coursefetch.
//!
//! Only failures that invalidate a whole course run are surfaced as [`Error`]:
//! a session that cannot be established, a catalogue page that cannot be read,
//! or a media fetcher that cannot be located. Failures scoped to one lesson or
//! one download job are reported as values instead (see
//! [`ResolutionFailure`](crate::resolve::ResolutionFailure),
//! [`FetchError`](crate::fetch::FetchError) and
//! [`Status::Fail`](crate::download::Status::Fail)) so the batch keeps going.

use std::io;
use thiserror::Error;

/// Errors that can abort a course run.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures internal errors that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A URL could not be parsed or joined against the site base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The authenticated session could not be established.
    ///
    /// Returned when the login exchange is rejected or the first navigation
    /// of a run fails. Nothing computed afterwards can be trusted.
    #[error("Session error: {0}")]
    Session(String),

    /// The course catalogue could not be extracted from the course page.
    #[error("Catalogue error: {0}")]
    Catalogue(String),

    /// A page renderer query failed.
    #[error("Render error: {0}")]
    Render(String),

    /// The external media fetcher could not be located or spawned.
    #[error("External tool error: {0}")]
    ExternalTool(String),

    /// I/O Error.
    ///
    /// Wraps standard I/O errors raised while inspecting or preparing the
    /// output directory.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack (retry, tracing).
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Result type alias for operations that can fail with a coursefetch error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::Session("login rejected".into()).to_string(),
            "Session error: login rejected"
        );
        assert_eq!(
            Error::Catalogue("no lessons".into()).to_string(),
            "Catalogue error: no lessons"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::IOError { .. }));
    }
}
