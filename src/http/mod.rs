//! HTTP module containing HTTP client functionality.
//!
//! The HTTP page renderer loads course pages through a client built here:
//! retry with exponential backoff for transient failures, request tracing,
//! a cookie store that keeps the login session, and default headers carrying
//! the shared user agent.
//!
//! # Examples
//!
//! ```rust
//! use coursefetch::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     headers: Some(headers),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
