//! Configuration management for docmodal.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

pub mod constants;
mod settings;
mod xdg;

pub use settings::{
    Config, DocumentSettings, GeneralSettings, LoggingSettings, ModalSettings, RendererChoice,
};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_NAME: &str = "default";
    pub const DOCUMENT_PATH: &str = "README.md";
    pub const DOCUMENT_BASE: &str = ".";
    pub const TIMEOUT_SECS: u64 = 30;
    pub const WIDTH_PERCENT: u16 = 80;
    pub const HEIGHT_PERCENT: u16 = 80;
    pub const SHOW_OPEN_BUTTON: bool = true;
    pub const MIN_LOG_LEVEL: &str = "info";
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// On first run, creates config file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let original_content = std::fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&original_content)?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated config
            if original_content != normalized_content {
                config.save_to(config_path)?;
            }

            Ok(config.sanitized())
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get path to themes directory.
    pub fn get_themes_dir() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("themes"))
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }

    /// Clamp percentages into a usable range.
    fn sanitized(mut self) -> Self {
        self.modal.width_percent = self.modal.width_percent.clamp(10, 100);
        self.modal.height_percent = self.modal.height_percent.clamp(10, 100);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.document.path, "README.md");
        assert_eq!(config.document.base, ".");
        assert_eq!(config.document.renderer, RendererChoice::Auto);
        assert!(!config.document.discard_stale);
        assert!(!config.modal.close_on_backdrop);
        assert!(config.modal.show_open_button);
        assert_eq!(config.logging.min_level, "info");
    }

    #[test]
    fn test_partial_content_fills_defaults() {
        let config = Config::validate_content(
            r#"
            [modal]
            close_on_backdrop = true

            [document]
            renderer = "plain"
            "#,
        )
        .unwrap();

        assert!(config.modal.close_on_backdrop);
        assert_eq!(config.modal.width_percent, defaults::WIDTH_PERCENT);
        assert_eq!(config.document.renderer, RendererChoice::Plain);
        assert_eq!(config.document.path, defaults::DOCUMENT_PATH);
    }

    #[test]
    fn test_invalid_renderer_rejected() {
        let result = Config::validate_content("[document]\nrenderer = \"html\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_first_load_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_normalizes_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[modal]\nwidth_percent = 250\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.modal.width_percent, 100);

        // Missing sections were written back
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[document]"));
        assert!(content.contains("[logging]"));
    }
}
