//! Core data types for the addic7ed.com scraper

use std::fmt;

use serde::Serialize;

use crate::client::AddictedClient;
use crate::stream::SubtitleStream;

/// Account credentials for addic7ed.com
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from a username/password pair
    ///
    /// Returns `None` for an empty username: such an account cannot log in
    /// and the client treats it as anonymous-only use.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Option<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return None;
        }
        Some(Self {
            username,
            password: password.into(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One subtitle offered for an episode
///
/// Extracted from the episode listing page; immutable once constructed.
/// Carries a back-reference to the owning session so the subtitle content
/// can be downloaded later without re-resolving anything.
#[derive(Debug, Clone, Serialize)]
pub struct Subtitle {
    /// Subtitle language, trimmed and lowercased
    pub language: String,

    /// Release/version label the subtitle was synced for (e.g. "DIMENSION");
    /// empty when the listing carries no version token
    pub release: String,

    /// How many times this subtitle has been downloaded
    pub downloads: u32,

    /// Site-relative download link (e.g. "/original/123/0")
    pub link: String,

    #[serde(skip)]
    pub(crate) client: AddictedClient,
}

impl Subtitle {
    /// Create an unopened content stream for this subtitle
    ///
    /// No network request happens until the first read, so callers can
    /// inspect metadata for many records and only pay for the downloads
    /// they want.
    pub fn stream(&self) -> SubtitleStream {
        SubtitleStream::new(self.client.clone(), self.link.clone())
    }
}

impl PartialEq for Subtitle {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
            && self.release == other.release
            && self.downloads == other.downloads
            && self.link == other.link
    }
}

impl Eq for Subtitle {}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtitle(language: &str, release: &str, downloads: u32, link: &str) -> Subtitle {
        Subtitle {
            language: language.to_string(),
            release: release.to_string(),
            downloads,
            link: link.to_string(),
            client: AddictedClient::new().unwrap(),
        }
    }

    #[test]
    fn test_credentials_empty_username_is_none() {
        assert!(Credentials::new("", "secret").is_none());
        assert!(Credentials::new("   ", "secret").is_none());
        assert!(Credentials::new("alice", "").is_some());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("alice", "secret").unwrap();
        let debug = format!("{credentials:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_subtitle_equality_ignores_session() {
        let a = subtitle("english", "DIMENSION", 42, "/original/1/0");
        let b = subtitle("english", "DIMENSION", 42, "/original/1/0");
        assert_eq!(a, b);

        let c = subtitle("french", "DIMENSION", 42, "/original/1/0");
        assert_ne!(a, c);
    }

    #[test]
    fn test_subtitle_serialization_skips_session() {
        let sub = subtitle("english", "LOL", 7, "/original/9/1");
        let json = serde_json::to_string(&sub).expect("Serialization should succeed");
        assert!(json.contains("\"language\":\"english\""));
        assert!(json.contains("\"release\":\"LOL\""));
        assert!(json.contains("\"downloads\":7"));
        assert!(json.contains("\"link\":\"/original/9/1\""));
        assert!(!json.contains("client"));
    }
}
