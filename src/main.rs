mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use docmodal_app::App;
use docmodal_config::Config;
use docmodal_theme::set_themes_dir;

#[derive(Parser, Debug)]
#[command(name = "docmodal", about = "Terminal documentation viewer", version)]
struct Cli {
    /// Document path, relative to the base (can also be set via DOCMODAL_DOCUMENT)
    #[arg(short, long, env = "DOCMODAL_DOCUMENT")]
    document: Option<String>,

    /// Base URL or directory the document path is resolved against
    #[arg(short, long, env = "DOCMODAL_BASE")]
    base: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Minimum log level (debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Open the documentation as soon as the screen is ready
    #[arg(long)]
    open: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load().unwrap_or_else(|e| {
                eprintln!("Warning: Could not load config: {}. Using defaults.", e);
                Config::default()
            }),
        };

        if let Some(document) = &self.document {
            config.document.path = document.clone();
        }
        if let Some(base) = &self.base {
            config.document.base = base.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.min_level = level.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // Initialize theme system with themes directory from config
    if let Ok(themes_dir) = Config::get_themes_dir() {
        set_themes_dir(themes_dir);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let mut app = App::new_with_size(config, size.width, size.height);
    if cli.open {
        app.open_documentation();
    }

    let result = app.run(&mut terminal, ui::render);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
