//! Retrieving raw document text.

use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::Duration;

use ureq::Agent;

use docmodal_config::constants::{MAX_DOCUMENT_SIZE, USER_AGENT};

use crate::{DocumentLocation, FetchError};

/// Retrieves the raw text of a document.
///
/// Called from a worker thread, hence `Send + Sync`.
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, location: &DocumentLocation) -> Result<String, FetchError>;
}

/// Fetcher backed by an HTTP agent and the local filesystem.
pub struct DefaultFetcher {
    agent: Agent,
    limit: u64,
}

impl DefaultFetcher {
    /// Create a fetcher whose HTTP requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            limit: MAX_DOCUMENT_SIZE,
        }
    }

    /// Override the maximum accepted document size.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    fn fetch_http(&self, url: &url::Url) -> Result<String, FetchError> {
        let response = self
            .agent
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => FetchError::Status { code },
                other => FetchError::Network(other.to_string()),
            })?;

        response
            .into_body()
            .with_config()
            .limit(self.limit)
            .read_to_string()
            .map_err(|e| match e {
                ureq::Error::BodyExceedsLimit(limit) => FetchError::TooLarge { limit },
                other => FetchError::Network(other.to_string()),
            })
    }

    fn fetch_file(&self, path: &Path) -> Result<String, FetchError> {
        let io_error = |source: std::io::Error| match source.kind() {
            ErrorKind::NotFound => FetchError::NotFound(path.to_path_buf()),
            _ => FetchError::Io {
                path: path.to_path_buf(),
                source,
            },
        };

        let file = std::fs::File::open(path).map_err(io_error)?;

        // Read one byte past the limit to detect oversized files
        let mut content = String::new();
        file.take(self.limit + 1)
            .read_to_string(&mut content)
            .map_err(io_error)?;

        if content.len() as u64 > self.limit {
            return Err(FetchError::TooLarge { limit: self.limit });
        }
        Ok(content)
    }
}

impl DocumentFetcher for DefaultFetcher {
    fn fetch(&self, location: &DocumentLocation) -> Result<String, FetchError> {
        match location {
            DocumentLocation::Http(url) => self.fetch_http(url),
            DocumentLocation::File(path) => self.fetch_file(path),
        }
    }
}
