//! HTTP session layer for addic7ed.com
//!
//! Owns the credentials and the authentication state machine, and exposes
//! the authenticated GET operation used by every other component. Login is
//! performed lazily, at most once, on the first operation that requires it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use scraper::{Html, Selector};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{AddictedError, Result};
use crate::types::Credentials;
use crate::url::{LOGIN_PATH, join};

const BASE_URL: &str = "https://www.addic7ed.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Element that only renders for logged-in users; its presence in the login
/// response is the sole success signal, HTTP status is not.
const LOGGED_IN_MARKER: &str = r#"a[href*="logout.php"]"#;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root, overridable for tests against a local server
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client wrapper owning the addic7ed.com session
///
/// Carries a cookie jar, a browser-like `User-Agent` and a fixed `Referer`
/// equal to the site root on every request (the site rejects unrecognized
/// clients). Cloning is cheap and clones share the same session state, so
/// subtitle records can keep a back-reference for later downloads.
#[derive(Clone)]
pub struct AddictedClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
    authenticated: Arc<Mutex<bool>>,
}

impl AddictedClient {
    /// Create an anonymous client with default configuration
    ///
    /// Only unauthenticated operations are available; any operation that
    /// requires auth fails with `NoCredentials`.
    pub fn new() -> Result<Self> {
        Self::with_config(None, ClientConfig::default())
    }

    /// Create a client that can log in with the given account
    ///
    /// An empty username is treated as "no credentials configured".
    pub fn with_credentials(username: &str, password: &str) -> Result<Self> {
        Self::with_config(Credentials::new(username, password), ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Option<Credentials>, config: ClientConfig) -> Result<Self> {
        let referer = config
            .base_url
            .parse()
            .map_err(|_| AddictedError::InvalidUrl(config.base_url.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(reqwest::header::REFERER, referer);
                headers
            })
            .build()
            .map_err(AddictedError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.base_url,
            credentials,
            authenticated: Arc::new(Mutex::new(false)),
        })
    }

    /// Fetch a page body from a path on the site
    ///
    /// With `requires_auth` set, the login transaction runs first unless the
    /// session is already authenticated. The response body is returned as-is
    /// regardless of HTTP status; callers classify pages by their structural
    /// markers, not status codes.
    ///
    /// # Errors
    /// - `NoCredentials` - auth required but none configured
    /// - `InvalidCredentials` - login attempted and rejected
    /// - `HttpError` - network or transport errors
    pub async fn fetch(&self, path: &str, requires_auth: bool) -> Result<String> {
        if requires_auth {
            self.ensure_authenticated().await?;
        }
        let url = join(&self.base_url, path);
        let response = self.client.get(&url).send().await?;
        Ok(response.text().await?)
    }

    /// Open an authenticated download connection for a relative link
    ///
    /// Returns the raw response so the caller can inspect the final resolved
    /// URL (the quota sentinel is a redirect target) and stream the body.
    pub async fn open_download(&self, link: &str) -> Result<reqwest::Response> {
        self.ensure_authenticated().await?;
        let url = join(&self.base_url, link);
        let response = self.client.get(&url).send().await?;
        Ok(response)
    }

    /// Whether the session has completed a login transaction
    pub async fn is_authenticated(&self) -> bool {
        *self.authenticated.lock().await
    }

    /// Run the login transaction unless the session is already authenticated
    ///
    /// The session mutex serializes callers so at most one login is in
    /// flight. The authenticated flag is sticky: once set it is never
    /// re-checked, and a failed login leaves it unset so the next
    /// authenticated call tries again.
    async fn ensure_authenticated(&self) -> Result<()> {
        let mut authenticated = self.authenticated.lock().await;
        if *authenticated {
            return Ok(());
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AddictedError::NoCredentials)?;

        debug!(username = %credentials.username, "logging in");

        let response = self
            .client
            .post(join(&self.base_url, LOGIN_PATH))
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                ("url", ""),
                ("Submit", "Log in"),
            ])
            .send()
            .await?;
        let body = response.text().await?;

        if !has_login_marker(&body)? {
            return Err(AddictedError::InvalidCredentials(
                credentials.username.clone(),
            ));
        }

        *authenticated = true;
        debug!("session authenticated");
        Ok(())
    }
}

impl fmt::Debug for AddictedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddictedClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

/// Checks the login response for the logged-in marker element
fn has_login_marker(html: &str) -> Result<bool> {
    let document = Html::parse_document(html);
    let marker = Selector::parse(LOGGED_IN_MARKER)
        .map_err(|e| AddictedError::UnexpectedContent(format!("invalid selector: {e:?}")))?;
    Ok(document.select(&marker).next().is_some())
}
