//! Theme system for docmodal.
//!
//! Provides color theme management with support for custom TOML themes.

mod colors;
mod loader;

pub use colors::Theme;
pub use loader::load_theme;

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

// Embed theme files at compile time
const THEME_DEFAULT_TOML: &str = include_str!("../themes/default.toml");
const THEME_DRACULA_TOML: &str = include_str!("../themes/dracula.toml");
const THEME_NORD_TOML: &str = include_str!("../themes/nord.toml");
const THEME_SOLARIZED_LIGHT_TOML: &str = include_str!("../themes/solarized-light.toml");

static THEME_DEFAULT: OnceLock<Theme> = OnceLock::new();
static THEME_DRACULA: OnceLock<Theme> = OnceLock::new();
static THEME_NORD: OnceLock<Theme> = OnceLock::new();
static THEME_SOLARIZED_LIGHT: OnceLock<Theme> = OnceLock::new();

// Cache for user-loaded themes
static USER_THEMES: OnceLock<Mutex<HashMap<String, &'static Theme>>> = OnceLock::new();

// Themes directory path (set by app on startup)
static THEMES_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Set the themes directory path (call this at app startup).
pub fn set_themes_dir(path: PathBuf) {
    let _ = THEMES_DIR.set(path);
}

/// Hardcoded fallback theme in case of parse errors.
fn get_hardcoded_fallback_theme(name: &'static str) -> Theme {
    Theme {
        name,
        bg: Color::Black,
        fg: Color::White,
        accented_bg: Color::DarkGray,
        accented_fg: Color::Cyan,
        selected_bg: Color::Blue,
        selected_fg: Color::White,
        disabled: Color::Gray,
        success: Color::Green,
        warning: Color::Yellow,
        error: Color::Red,
    }
}

fn load_builtin(content: &str, name: &'static str) -> Theme {
    loader::load_theme_from_str(content, name).unwrap_or_else(|_| get_hardcoded_fallback_theme(name))
}

fn builtin(name: &str) -> Option<&'static Theme> {
    let theme = match name {
        "default" => THEME_DEFAULT.get_or_init(|| load_builtin(THEME_DEFAULT_TOML, "default")),
        "dracula" => THEME_DRACULA.get_or_init(|| load_builtin(THEME_DRACULA_TOML, "dracula")),
        "nord" => THEME_NORD.get_or_init(|| load_builtin(THEME_NORD_TOML, "nord")),
        "solarized-light" => THEME_SOLARIZED_LIGHT
            .get_or_init(|| load_builtin(THEME_SOLARIZED_LIGHT_TOML, "solarized-light")),
        _ => return None,
    };
    Some(theme)
}

/// Try to load user theme from config directory.
fn try_load_user_theme(name: &str) -> Option<&'static Theme> {
    let cache = USER_THEMES.get_or_init(|| Mutex::new(HashMap::new()));

    {
        let cache_lock = cache.lock().ok()?;
        if let Some(theme) = cache_lock.get(name) {
            return Some(*theme);
        }
    }

    let theme_path = THEMES_DIR.get()?.join(format!("{}.toml", name));
    if !theme_path.exists() {
        return None;
    }

    let theme = load_theme(&theme_path).ok()?;

    // Leak the theme to get 'static reference
    let static_theme: &'static Theme = Box::leak(Box::new(theme));

    if let Ok(mut cache_lock) = cache.lock() {
        cache_lock.insert(name.to_string(), static_theme);
    }

    Some(static_theme)
}

impl Theme {
    /// Get theme by name.
    ///
    /// User themes from the themes directory shadow built-in ones.
    /// Unknown names resolve to the default theme.
    pub fn get_by_name(name: &str) -> &'static Theme {
        try_load_user_theme(name)
            .or_else(|| builtin(name))
            .unwrap_or_else(|| {
                THEME_DEFAULT.get_or_init(|| load_builtin(THEME_DEFAULT_TOML, "default"))
            })
    }
}
