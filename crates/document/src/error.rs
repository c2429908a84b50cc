//! Document fetch errors.

use std::path::PathBuf;

use thiserror::Error;

/// Why a document could not be retrieved.
///
/// The `Display` text is shown to the user inside the open panel.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The base/path pair does not form a usable location
    #[error("invalid document location: {0}")]
    InvalidLocation(String),

    /// Connection, DNS, TLS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx HTTP response
    #[error("{}", status_text(.code))]
    Status { code: u16 },

    /// Local document does not exist
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    /// Other filesystem failure
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document exceeds the size limit
    #[error("document larger than {limit} bytes")]
    TooLarge { limit: u64 },

    /// Background worker could not be started
    #[error("could not start fetch: {0}")]
    Worker(String),
}

fn status_text(code: &u16) -> String {
    let reason = ureq::http::StatusCode::from_u16(*code)
        .ok()
        .and_then(|status| status.canonical_reason());
    match reason {
        Some(reason) => format!("HTTP {} {}", code, reason),
        None => format!("HTTP {}", code),
    }
}
