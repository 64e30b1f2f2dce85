//! Addic7ed Scraper Core Library
//!
//! Provides an async API for browsing shows and downloading subtitles from
//! addic7ed.com, a subtitle site with no formal API: every operation works
//! by fetching and parsing the site's HTML pages as a logged-in web user.
//!
//! # Overview
//!
//! This crate provides a complete scraping solution for addic7ed.com with:
//! - A cookie-backed session that logs in lazily, at most once
//! - HTML parsers for the show catalog and episode subtitle listings
//! - Lazy, quota-aware streaming of subtitle file content
//! - Pure filtering/ordering helpers over subtitle records
//!
//! # Example
//!
//! ```no_run
//! use addicted_core::{AddictedScraper, Result, filter_by_language, order_by_downloads};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = AddictedScraper::with_credentials("user", "password")?;
//!
//!     // Resolve the show id from the cached catalog
//!     let shows = scraper.shows().await?;
//!     let show_id = &shows["Doctor Who"];
//!
//!     // List subtitles for season 7, episode 5
//!     let subtitles = scraper.subtitles(show_id, 7, 5).await?;
//!     let english = filter_by_language(&subtitles, "english");
//!     let ranked = order_by_downloads(&english);
//!
//!     // Only the chosen subtitle opens a connection
//!     if let Some(best) = ranked.last() {
//!         let mut stream = best.stream();
//!         let content = stream.read_to_end().await?;
//!         println!("{} bytes of {}", content.len(), best.release);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error classification
//!
//! Callers are expected to distinguish [`AddictedError::EpisodeNotFound`]
//! (an expected, non-fatal condition) from
//! [`AddictedError::UnexpectedContent`] (the site's layout changed and the
//! integration needs maintenance). Download quota exhaustion surfaces as
//! [`AddictedError::DownloadLimitExceeded`] on the content stream.

mod client;
mod error;
mod filter;
pub mod parser;
mod scraper;
mod stream;
mod types;
pub mod url;

// Re-export client types
pub use client::{AddictedClient, ClientConfig};

// Re-export error types
pub use error::{AddictedError, Result};

// Re-export collection utilities
pub use filter::{filter_by_language, order_by_downloads};

// Re-export parser functions
pub use parser::{parse_episode_subtitles, parse_show_catalog};

// Re-export main scraper API
pub use scraper::AddictedScraper;

// Re-export stream type
pub use stream::SubtitleStream;

// Re-export data types
pub use types::{Credentials, Subtitle};
