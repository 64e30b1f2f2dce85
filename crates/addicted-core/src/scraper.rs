//! Main scraper API for addic7ed.com
//!
//! Combines the HTTP session layer with the HTML parsers and owns the
//! per-instance show catalog cache.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

use crate::client::{AddictedClient, ClientConfig};
use crate::error::Result;
use crate::parser::{parse_episode_subtitles, parse_show_catalog};
use crate::types::{Credentials, Subtitle};
use crate::url::build_episode_path;

/// Main scraper API for addic7ed.com
///
/// The show catalog is fetched once, on first use, and cached for the
/// lifetime of this instance; it is never refreshed automatically. The
/// catalog cache and the login state are both lazy and mutex-guarded, so a
/// shared scraper never double-fetches or double-logs-in.
pub struct AddictedScraper {
    client: AddictedClient,
    shows: Mutex<Option<HashMap<String, String>>>,
}

impl AddictedScraper {
    /// Create an anonymous scraper with default configuration
    ///
    /// Listing operations work anonymously; downloading subtitle content
    /// requires credentials.
    pub fn new() -> Result<Self> {
        Self::with_config(None, ClientConfig::default())
    }

    /// Create a scraper that can log in with the given account
    pub fn with_credentials(username: &str, password: &str) -> Result<Self> {
        Self::with_config(Credentials::new(username, password), ClientConfig::default())
    }

    /// Create a scraper with custom client configuration
    pub fn with_config(credentials: Option<Credentials>, config: ClientConfig) -> Result<Self> {
        let client = AddictedClient::with_config(credentials, config)?;
        Ok(Self {
            client,
            shows: Mutex::new(None),
        })
    }

    /// The underlying session client
    pub fn client(&self) -> &AddictedClient {
        &self.client
    }

    /// Show catalog: title → opaque show id
    ///
    /// The first call fetches and parses the site root; subsequent calls
    /// return the cached mapping without any network access. An empty
    /// catalog is valid, though callers should treat it as suspicious.
    ///
    /// # Errors
    /// - `HttpError` if the network request fails
    /// - `UnexpectedContent` if the listing structure changed
    pub async fn shows(&self) -> Result<HashMap<String, String>> {
        let mut cache = self.shows.lock().await;
        if let Some(shows) = cache.as_ref() {
            return Ok(shows.clone());
        }

        let html = self.client.fetch("/", false).await?;
        let shows = parse_show_catalog(&html)?;
        debug!(count = shows.len(), "show catalog loaded");
        *cache = Some(shows.clone());
        Ok(shows)
    }

    /// Look up a show id by title, case-insensitively
    ///
    /// Uses the cached catalog; returns `None` when no title matches.
    pub async fn show_id(&self, title: &str) -> Result<Option<String>> {
        let shows = self.shows().await?;
        let wanted = title.trim().to_lowercase();
        Ok(shows
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, id)| id.clone()))
    }

    /// Subtitles available for one episode, in document order
    ///
    /// Season and episode are small non-negative numbers formatted as plain
    /// decimal. Records come back with a session back-reference so their
    /// content can be streamed later.
    ///
    /// # Errors
    /// - `EpisodeNotFound` if the show/season/episode combination does not
    ///   exist on the site
    /// - `UnexpectedContent` if the listing structure changed
    /// - `HttpError` if the network request fails
    pub async fn subtitles(
        &self,
        show_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<Vec<Subtitle>> {
        let path = build_episode_path(show_id, season, episode);
        let html = self.client.fetch(&path, false).await?;
        let subtitles = parse_episode_subtitles(&html, &self.client)?;
        debug!(
            show_id,
            season,
            episode,
            count = subtitles.len(),
            "episode subtitles extracted"
        );
        Ok(subtitles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AddictedError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ROOT_PAGE: &str = r#"
    <html><body>
        <select id="qsShow">
            <option value="1">Breaking Bad</option>
            <option value="42">Doctor Who</option>
        </select>
    </body></html>
    "#;

    const EPISODE_PAGE: &str = r#"
    <html><body>
    <div id="container">
      <div id="container95m">
        <table>
          <tr><td class="NewsTitle">Version FoV, 0.00 MBs</td></tr>
          <tr>
            <td class="language">English</td>
            <td><a class="buttonDownload" href="/original/123/0">Download</a></td>
          </tr>
          <tr><td>123 Downloads</td></tr>
        </table>
      </div>
    </div>
    </body></html>
    "#;

    fn scraper(server: &MockServer) -> AddictedScraper {
        AddictedScraper::with_config(
            None,
            ClientConfig {
                base_url: server.uri(),
                timeout_secs: 5,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_scraper_creation() {
        assert!(AddictedScraper::new().is_ok());
        assert!(AddictedScraper::with_credentials("alice", "secret").is_ok());
    }

    #[tokio::test]
    async fn test_catalog_is_fetched_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ROOT_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper(&server);
        let first = scraper.shows().await.unwrap();
        let second = scraper.shows().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.get("Doctor Who"), Some(&"42".to_string()));
    }

    #[tokio::test]
    async fn test_show_id_lookup_is_case_insensitive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ROOT_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper(&server);
        assert_eq!(
            scraper.show_id("doctor who").await.unwrap(),
            Some("42".to_string())
        );
        assert_eq!(scraper.show_id("Unknown Show").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_subtitles_builds_episode_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/re_episode.php"))
            .and(query_param("ep", "42-2x5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EPISODE_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper(&server);
        let subtitles = scraper.subtitles("42", 2, 5).await.unwrap();
        assert_eq!(subtitles.len(), 1);
        assert_eq!(subtitles[0].language, "english");
        assert_eq!(subtitles[0].release, "FoV");
        assert_eq!(subtitles[0].downloads, 123);
    }

    #[tokio::test]
    async fn test_subtitles_episode_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/re_episode.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body>nope</body></html>"),
            )
            .mount(&server)
            .await;

        let scraper = scraper(&server);
        let result = scraper.subtitles("42", 99, 99).await;
        assert!(matches!(result, Err(AddictedError::EpisodeNotFound)));
    }
}
