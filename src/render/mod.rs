//! Page rendering capability.
//!
//! The pipeline never talks to the course site directly. It drives a
//! [`PageRenderer`], which owns the single live session (cookies, current
//! page) for the whole run and answers three structured queries about the
//! page it is on: the course catalogue, the embedded media source, and the
//! list of course links.
//!
//! - [`traits`] - the `PageRenderer` trait and its supporting types
//! - [`http`] - a renderer that loads pages over HTTP and scans their markup

pub mod http;
pub mod traits;

pub use http::{find_media_source, HttpPageRenderer, RendererConfig};
pub use traits::{Credentials, PageRenderer, WaitPolicy};
