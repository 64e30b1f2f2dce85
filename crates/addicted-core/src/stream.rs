//! Lazy subtitle content stream
//!
//! One stream per subtitle record. The download connection is opened on the
//! first read, not at construction, so callers can pick subtitles by
//! metadata before paying any network cost. The site signals a spent daily
//! quota by redirecting the download to a sentinel page; that is detected
//! at open time and poisons the stream before any content is yielded.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::client::AddictedClient;
use crate::error::{AddictedError, Result};
use crate::url::DOWNLOAD_EXCEEDED_PATH;

enum StreamState {
    Unopened,
    Open(reqwest::Response),
    LimitExceeded,
    Closed,
}

/// Byte stream over one subtitle's content
///
/// State machine: unopened → open → closed, with a terminal limit-exceeded
/// state when the quota redirect is detected. Opened at most once; never
/// re-opened after close. Reads take `&mut self` - one reader at a time.
pub struct SubtitleStream {
    client: AddictedClient,
    link: String,
    state: StreamState,
}

impl SubtitleStream {
    pub(crate) fn new(client: AddictedClient, link: String) -> Self {
        Self {
            client,
            link,
            state: StreamState::Unopened,
        }
    }

    /// Read the next chunk of subtitle content
    ///
    /// The first call opens the authenticated download connection; later
    /// calls pass through to it. Returns `Ok(None)` at end of stream and
    /// on a closed stream.
    ///
    /// # Errors
    /// - `DownloadLimitExceeded` - the download resolved to the quota page;
    ///   this and every later read fail without yielding any bytes
    /// - `NoCredentials` / `InvalidCredentials` - session could not log in
    /// - `HttpError` - transport errors
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        match &mut self.state {
            StreamState::Open(response) => return Ok(response.chunk().await?),
            StreamState::LimitExceeded => return Err(AddictedError::DownloadLimitExceeded),
            StreamState::Closed => return Ok(None),
            StreamState::Unopened => {}
        }

        let mut response = self.client.open_download(&self.link).await?;
        if response.url().path() == DOWNLOAD_EXCEEDED_PATH {
            warn!(link = %self.link, "daily download limit reached");
            self.state = StreamState::LimitExceeded;
            return Err(AddictedError::DownloadLimitExceeded);
        }

        debug!(link = %self.link, "download stream opened");
        let first = response.chunk().await?;
        self.state = StreamState::Open(response);
        Ok(first)
    }

    /// Drain the remaining content into a buffer and close the stream
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        while let Some(chunk) = self.chunk().await? {
            content.extend_from_slice(&chunk);
        }
        self.close();
        Ok(content)
    }

    /// Release the underlying connection, if one was opened
    ///
    /// Closing an unopened stream is a no-op, not an error. A closed stream
    /// reads as end-of-stream and is never re-opened. A limit-exceeded
    /// stream stays limit-exceeded so later reads keep reporting the quota.
    pub fn close(&mut self) {
        match self.state {
            StreamState::LimitExceeded => {}
            StreamState::Open(_) => {
                debug!(link = %self.link, "download stream closed");
                self.state = StreamState::Closed;
            }
            _ => self.state = StreamState::Closed,
        }
    }

    /// Whether the underlying connection is currently open
    pub fn is_open(&self) -> bool {
        matches!(self.state, StreamState::Open(_))
    }
}
