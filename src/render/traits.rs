//! Traits and types for page rendering.

use crate::catalogue::RawCatalogue;
use crate::error::Result;

use async_trait::async_trait;
use std::fmt;

/// When a navigation is considered finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitPolicy {
    /// Wait until the document has been fully received.
    #[default]
    Load,
    /// Wait until the network has been idle for a short while.
    NetworkIdle,
}

/// Login credentials for the course site.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account e-mail.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates new [`Credentials`].
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A live browsing session.
///
/// Implementations hold exactly one current page. Every query reads that
/// page, so callers must [`navigate`](PageRenderer::navigate) first. The
/// session is not meant to be shared between concurrent tasks.
#[async_trait]
pub trait PageRenderer: Send {
    /// Authenticate the session.
    ///
    /// A failed login is fatal for the run and is reported as
    /// [`Error::Session`](crate::Error::Session).
    async fn login(&mut self, credentials: &Credentials) -> Result<()>;

    /// Load `url` and make it the current page.
    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> Result<()>;

    /// URL of the current page, if any page has been loaded.
    fn current_url(&self) -> Option<&str>;

    /// Extract the course title and lesson entries from the current page.
    async fn catalogue(&mut self) -> Result<RawCatalogue>;

    /// Source URL of the embedded media player on the current page, if any.
    async fn media_source(&mut self) -> Result<Option<String>>;

    /// Links to course pages listed on the current page.
    async fn course_links(&mut self) -> Result<Vec<String>>;

    /// User agent the session presents to the site.
    fn user_agent(&self) -> &str;
}
