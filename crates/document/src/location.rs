//! Resolving a relative document path against a base location.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::FetchError;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocation {
    /// Retrieved with an HTTP GET
    Http(Url),
    /// Read from the local filesystem
    File(PathBuf),
}

impl DocumentLocation {
    /// Resolve `path` against `base`.
    ///
    /// `base` may be an `http(s)://` URL, a `file://` URL or a plain
    /// directory. URL bases follow browser rules: `http://host/docs/`
    /// joined with `README.md` gives `http://host/docs/README.md`, while
    /// `http://host/index.html` gives `http://host/README.md`. A `path`
    /// that is itself an absolute URL ignores the base.
    pub fn resolve(base: &str, path: &str) -> Result<Self, FetchError> {
        if path.trim().is_empty() {
            return Err(FetchError::InvalidLocation("empty document path".into()));
        }

        if let Some(url) = parse_url(path) {
            return Self::from_url(url);
        }

        match parse_url(base) {
            Some(base_url) => {
                let joined = base_url
                    .join(path)
                    .map_err(|e| FetchError::InvalidLocation(format!("{}: {}", path, e)))?;
                Self::from_url(joined)
            }
            None => Ok(Self::File(Path::new(base).join(path))),
        }
    }

    fn from_url(url: Url) -> Result<Self, FetchError> {
        match url.scheme() {
            "http" | "https" => Ok(Self::Http(url)),
            "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|_| FetchError::InvalidLocation(url.to_string())),
            scheme => Err(FetchError::InvalidLocation(format!(
                "unsupported scheme '{}' in {}",
                scheme, url
            ))),
        }
    }

    /// Short name for titles and messages (the last path segment).
    pub fn display_name(&self) -> String {
        let name = match self {
            Self::Http(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
            Self::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        };
        name.unwrap_or_else(|| self.to_string())
    }
}

/// Parse `s` as a URL, treating single-letter schemes as Windows drive letters.
fn parse_url(s: &str) -> Option<Url> {
    Url::parse(s).ok().filter(|url| url.scheme().len() > 1)
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
