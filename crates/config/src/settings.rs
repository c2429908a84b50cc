//! Configuration structures for docmodal settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Document source and rendering settings
    #[serde(default)]
    pub document: DocumentSettings,

    /// Modal panel behavior
    #[serde(default)]
    pub modal: ModalSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Selected theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

/// Which renderer turns document text into displayable lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererChoice {
    /// Markdown when available, plain text otherwise
    #[default]
    Auto,
    /// Markdown (falls back to plain text if compiled out)
    Markdown,
    /// Preformatted plain text
    Plain,
}

/// Document settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Document path, relative to `base`
    #[serde(default = "default_document_path")]
    pub path: String,

    /// Base location: an http(s) URL, a file:// URL or a directory
    #[serde(default = "default_document_base")]
    pub base: String,

    /// Renderer selection
    #[serde(default)]
    pub renderer: RendererChoice,

    /// Network timeout for HTTP fetches in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Drop fetch results that were superseded by a newer open
    #[serde(default)]
    pub discard_stale: bool,
}

/// Modal panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalSettings {
    /// Close the panel when clicking outside of it
    #[serde(default)]
    pub close_on_backdrop: bool,

    /// Panel width as percentage of the screen
    #[serde(default = "default_width_percent")]
    pub width_percent: u16,

    /// Panel height as percentage of the screen
    #[serde(default = "default_height_percent")]
    pub height_percent: u16,

    /// Show the open button on the host screen
    #[serde(default = "default_show_open_button")]
    pub show_open_button: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_document_path() -> String {
    defaults::DOCUMENT_PATH.to_string()
}

fn default_document_base() -> String {
    defaults::DOCUMENT_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    defaults::TIMEOUT_SECS
}

fn default_width_percent() -> u16 {
    defaults::WIDTH_PERCENT
}

fn default_height_percent() -> u16 {
    defaults::HEIGHT_PERCENT
}

fn default_show_open_button() -> bool {
    defaults::SHOW_OPEN_BUTTON
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            path: default_document_path(),
            base: default_document_base(),
            renderer: RendererChoice::default(),
            timeout_secs: default_timeout_secs(),
            discard_stale: false,
        }
    }
}

impl Default for ModalSettings {
    fn default() -> Self {
        Self {
            close_on_backdrop: false,
            width_percent: default_width_percent(),
            height_percent: default_height_percent(),
            show_open_button: default_show_open_button(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
