//! Media Fetcher capability.
//!
//! The byte-level transfer of a video is delegated to an external tool. The
//! rest of the crate only sees the [`MediaFetcher`] trait: hand it a
//! [`FetchRequest`], get back success or a [`FetchError`].
//!
//! - [`traits`] - `MediaFetcher`, `FetchRequest` and `FetchError`
//! - [`ytdlp`] - a fetcher running the `yt-dlp` binary

pub mod traits;
pub mod ytdlp;

pub use traits::{FetchError, FetchRequest, MediaFetcher};
pub use ytdlp::YtDlpFetcher;
