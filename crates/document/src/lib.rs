//! Document fetching and rendering for docmodal.
//!
//! - [`DocumentLocation`] resolves a relative path against an HTTP or
//!   filesystem base
//! - [`DocumentFetcher`] retrieves raw text ([`DefaultFetcher`] speaks
//!   HTTP and reads files)
//! - [`DocumentLoader`] runs fetches off the UI thread
//! - [`DocumentRenderer`] turns text into styled lines, with markdown
//!   support behind the `markdown` feature

mod error;
mod fetch;
mod loader;
mod location;
#[cfg(feature = "markdown")]
mod markdown;
mod render;

pub use error::FetchError;
pub use fetch::{DefaultFetcher, DocumentFetcher};
pub use loader::{DocumentLoader, FetchCompletion, RequestId};
pub use location::DocumentLocation;
#[cfg(feature = "markdown")]
pub use markdown::MarkdownRenderer;
pub use render::{markdown_renderer, renderer_for, DocumentRenderer, PlainTextRenderer};
