pub mod clear;
pub mod compare;
pub mod config;
pub mod details;
pub mod favorites;
pub mod history;
pub mod search;
pub mod shell;
pub mod theme;

use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use movie_search_config::{Config, FileStore, LocalStore, PathManager};
use movie_search_core::{OrchestratorOptions, SearchOrchestrator, Theme};
use movie_search_models::SearchResult;
use movie_search_sources::{HttpImageFetcher, OmdbClient};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

pub const RESET_HINT: &str = "marquee clear --state";

/// Loaded configuration and saved state for one invocation
pub struct Session {
    pub config: Config,
    pub paths: PathManager,
    pub store: Arc<dyn LocalStore>,
}

impl Session {
    pub fn open() -> Result<Self> {
        let paths = PathManager::new().map_err(|e| eyre!("{}", e))?;
        paths.ensure_directories().map_err(|e| eyre!("{}", e))?;

        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

        let state_file = paths.state_file();
        let store = FileStore::open(state_file.clone())
            .map_err(|e| eyre!("Failed to read saved state from {}: {}", state_file.display(), e))?;

        tracing::debug!("Session opened with state at {}", state_file.display());
        Ok(Self {
            config,
            paths,
            store: Arc::new(store),
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::load(self.store.as_ref())
    }

    fn client(&self) -> Result<OmdbClient> {
        self.config.validate().map_err(|e| eyre!("{}", e))?;
        OmdbClient::from_config(&self.config).map_err(|e| eyre!("{}", e))
    }

    /// Orchestrator talking to the configured API; fails when no API key is set
    pub fn orchestrator(&self) -> Result<SearchOrchestrator> {
        let client = self.client()?;
        Ok(SearchOrchestrator::new(
            Arc::new(client),
            self.store.clone(),
            OrchestratorOptions::from_config(&self.config),
        ))
    }

    pub fn image_fetcher(&self) -> Result<HttpImageFetcher> {
        HttpImageFetcher::new(Duration::from_secs(self.config.api.timeout_secs)).map_err(|e| eyre!("{}", e))
    }
}

/// Last-resort message for any command failure
pub fn report_fault(error: &color_eyre::Report, output: &Output) {
    output.error(format!("Something went wrong: {}", error));
    output.info(format!("If this keeps happening, reset saved data with `{}`", RESET_HINT));
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Spinner for network waits; `None` when output is not a human terminal
pub fn spinner(output: &Output, message: impl Into<String>) -> Option<ProgressBar> {
    if !output.is_human() || output.is_quiet() || !is_interactive() {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

/// One numbered line per title, with markers for favorites and compare picks
pub fn print_cards(
    output: &Output,
    results: &[SearchResult],
    start_index: usize,
    is_favorite: impl Fn(&str) -> bool,
    in_compare: impl Fn(&str) -> bool,
) {
    for (offset, item) in results.iter().enumerate() {
        let mut markers = String::new();
        if is_favorite(&item.imdb_id) {
            markers.push_str(" ♥");
        }
        if in_compare(&item.imdb_id) {
            markers.push_str(" ⇄");
        }
        output.println(format!(
            "{:>3}. {} ({}) {} {}{}",
            start_index + offset,
            output.accent(&item.title),
            item.year,
            output.dim(item.kind.as_str()),
            output.dim(&item.imdb_id),
            markers
        ));
    }
}
