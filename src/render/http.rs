//! Page renderer backed by plain HTTP requests.
//!
//! Pages are fetched with the crate's HTTP client and queried by scanning
//! their markup. Content injected by client-side scripts is invisible to
//! this renderer.

use super::traits::{Credentials, PageRenderer, WaitPolicy};
use crate::catalogue::{extract_catalogue, extract_course_links, html, RawCatalogue};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::{debug, info, warn};

/// Browser-like user agent presented by default.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Host of the embedded player whose iframes carry the media source.
const PLAYER_HOST: &str = "player.vimeo.com";

/// Configuration of an [`HttpPageRenderer`].
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Root of the course site, used for the login and course listing pages.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// HTTP client options. A `User-Agent` header is added automatically.
    pub http: HttpClientConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: "https://vueschool.io".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http: HttpClientConfig::default(),
        }
    }
}

struct LoadedPage {
    url: String,
    html: String,
}

/// A [`PageRenderer`] that loads pages over HTTP.
pub struct HttpPageRenderer {
    client: ClientWithMiddleware,
    base_url: Url,
    user_agent: String,
    page: Option<LoadedPage>,
}

impl fmt::Debug for HttpPageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPageRenderer")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("current_url", &self.current_url())
            .finish()
    }
}

impl HttpPageRenderer {
    /// Creates a renderer with its own HTTP session.
    pub fn new(config: RendererConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::InvalidUrl(format!(
                "The url \"{}\" cannot be parsed: {}",
                config.base_url, e
            ))
        })?;

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::Internal(format!("Invalid user agent: {}", e)))?;
        let mut headers = config.http.headers.clone().unwrap_or_else(HeaderMap::new);
        headers.insert(USER_AGENT, user_agent);

        let client = create_http_client(HttpClientConfig {
            headers: Some(headers),
            ..config.http
        })?;

        Ok(Self {
            client,
            base_url,
            user_agent: config.user_agent,
            page: None,
        })
    }

    /// Resolve `path` against the site root.
    pub fn site_url(&self, path: &str) -> Result<String> {
        self.base_url
            .join(path)
            .map(String::from)
            .map_err(|e| Error::InvalidUrl(format!("Cannot join \"{}\": {}", path, e)))
    }

    fn current_page(&self) -> Result<&LoadedPage> {
        self.page
            .as_ref()
            .ok_or_else(|| Error::Render("No page has been loaded".into()))
    }
}

#[async_trait]
impl PageRenderer for HttpPageRenderer {
    async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let login_url = self.site_url("/login")?;
        self.navigate(&login_url, WaitPolicy::NetworkIdle)
            .await
            .map_err(|e| Error::Session(format!("Cannot open login page: {}", e)))?;

        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("email", &credentials.email)
            .append_pair("password", &credentials.password)
            .finish();

        debug!(email = %credentials.email, "Submitting login form");
        let res = self
            .client
            .post(login_url.as_str())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(REFERER, login_url.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Session(format!("Login request failed: {}", e)))?;

        let res = res
            .error_for_status()
            .map_err(|e| Error::Session(format!("Login rejected: {}", e)))?;

        let landed = res.url().to_string();
        let html = res.text().await?;
        if landed.contains("/login") {
            warn!(url = %landed, "Still on the login page, login might still be successful");
        } else {
            info!(url = %landed, "Logged in");
        }
        self.page = Some(LoadedPage { url: landed, html });
        Ok(())
    }

    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> Result<()> {
        debug!(url, ?wait, "Navigating");
        let mut req = self.client.get(url);
        if let Some(page) = &self.page {
            req = req.header(REFERER, page.url.as_str());
        }
        let res = req.send().await?.error_for_status()?;
        let landed = res.url().to_string();
        let html = res.text().await?;
        self.page = Some(LoadedPage { url: landed, html });
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.page.as_ref().map(|p| p.url.as_str())
    }

    async fn catalogue(&mut self) -> Result<RawCatalogue> {
        let page = self.current_page()?;
        extract_catalogue(&page.html, &page.url)
    }

    async fn media_source(&mut self) -> Result<Option<String>> {
        let page = self.current_page()?;
        Ok(find_media_source(&page.html))
    }

    async fn course_links(&mut self) -> Result<Vec<String>> {
        let page = self.current_page()?;
        extract_course_links(&page.html, &page.url)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Source of the first embedded player iframe in `html`.
pub fn find_media_source(html: &str) -> Option<String> {
    html::elements(html, "iframe")
        .iter()
        .filter_map(|frame| frame.attr("src"))
        .find(|src| src.contains(PLAYER_HOST))
}
