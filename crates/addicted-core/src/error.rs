//! Error types for the addic7ed.com scraper
//!
//! Provides one error enum shared by every component, with human-readable
//! messages and string serialization for embedding hosts.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all addic7ed.com scraper operations
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally and partial results are never returned.
#[derive(Error, Debug)]
pub enum AddictedError {
    /// HTTP request failed (connection, DNS, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Authenticated operation attempted without configured credentials
    #[error("No credentials configured for authenticated request")]
    NoCredentials,

    /// Login was attempted and rejected by the site
    #[error("Login rejected for user: {0}")]
    InvalidCredentials(String),

    /// The episode page lacks the page container; this show/season/episode
    /// combination does not exist on the site
    #[error("Episode not found")]
    EpisodeNotFound,

    /// Expected HTML structure (attribute, sub-element, numeric text) was
    /// missing or malformed; the site layout has changed
    #[error("Unexpected page content: {0}")]
    UnexpectedContent(String),

    /// The download resolved to the daily quota-exceeded page
    #[error("Daily download limit exceeded")]
    DownloadLimitExceeded,

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Serialize for AddictedError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for addic7ed.com scraper operations
pub type Result<T> = std::result::Result<T, AddictedError>;
