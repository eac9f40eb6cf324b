use crate::cache::{details_key, normalize_term, search_key, suggest_key, ResultCache, ResultPage};
use crate::compare::{CompareChange, CompareReport, CompareSelection};
use crate::debounce::Debouncer;
use crate::dedupe::remove_duplicates_by_imdb_id;
use crate::error::{LoadError, PersistError};
use crate::favorites::Favorites;
use crate::history::WatchHistory;
use crate::theme::Theme;
use crate::view::{SearchView, ViewStatus};
use chrono::Utc;
use movie_search_config::{keys, Config, LocalStore, StoreError};
use movie_search_models::{HistoryEntry, MovieDetails, SearchResult, TypeFilter};
use movie_search_sources::{MovieApi, PlotLength, SearchQuery, SearchResponse, SourceError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    pub debounce: Duration,
    pub suggestion_limit: usize,
    pub history_limit: usize,
    /// `None` keeps every response for the whole session
    pub cache_max_entries: Option<usize>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            suggestion_limit: 5,
            history_limit: 20,
            cache_max_entries: None,
        }
    }
}

impl OrchestratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: Duration::from_millis(config.search.debounce_ms),
            suggestion_limit: config.search.suggestion_limit,
            history_limit: config.search.history_limit,
            cache_max_entries: config.cache.max_entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank term, nothing done
    Skipped,
    /// Same query is already being fetched
    AlreadyInFlight,
    Cached(ResultPage),
    Fetched(ResultPage),
    NotFound { message: String },
    /// A newer search started while this one was in flight; its result was dropped
    Superseded,
    Failed(LoadError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestOutcome {
    /// A later keystroke replaced this one before the delay elapsed
    Debounced,
    Cleared,
    /// Same term as the suggestions already shown or in flight
    Unchanged,
    Cached(Vec<SearchResult>),
    Fetched(Vec<SearchResult>),
    /// The list was cleared or a newer term was requested meanwhile
    Discarded,
    Failed(LoadError),
}

struct State {
    cache: ResultCache,
    in_flight_search: Option<String>,
    in_flight_suggest: Option<String>,
    last_suggest_term: Option<String>,
    debouncer: Debouncer,
    suggestions: Vec<SearchResult>,
    view: SearchView,
    selected: Option<MovieDetails>,
    details_error: Option<LoadError>,
}

#[derive(Debug, Clone, Copy)]
enum Marker {
    Search,
    Suggest,
}

/// Owns the in-flight marker of one request across its fetch
///
/// Dropped without [`InFlight::complete`] (the caller gave up on the future),
/// it clears the marker if it still names this request and puts back the
/// listing that was shown before the search started.
struct InFlight<'a> {
    orchestrator: &'a SearchOrchestrator,
    marker: Marker,
    key: String,
    previous_view: Option<SearchView>,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn new(orchestrator: &'a SearchOrchestrator, marker: Marker, key: String, previous_view: Option<SearchView>) -> Self {
        Self {
            orchestrator,
            marker,
            key,
            previous_view,
            done: false,
        }
    }

    fn complete(mut self) {
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }

        let mut state = self.orchestrator.state();
        let slot = match self.marker {
            Marker::Search => &mut state.in_flight_search,
            Marker::Suggest => &mut state.in_flight_suggest,
        };
        if slot.as_deref() != Some(self.key.as_str()) {
            return;
        }
        *slot = None;
        debug!("{:?} {} abandoned before its response arrived", self.marker, self.key);

        if let Some(view) = self.previous_view.take() {
            state.view = view;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Coordinates listing searches, suggestions and details lookups against the
/// movie API, with caching and persisted user collections.
///
/// Safe to share between tasks. Internal state is only locked between awaits,
/// and a request whose future is dropped mid-fetch releases its in-flight marker.
/// The persisted collections have their own locks; store writes never hold the
/// search state lock.
pub struct SearchOrchestrator {
    api: Arc<dyn MovieApi>,
    store: Arc<dyn LocalStore>,
    options: OrchestratorOptions,
    state: Mutex<State>,
    favorites: Mutex<Favorites>,
    history: Mutex<WatchHistory>,
    compare: Mutex<CompareSelection>,
}

impl SearchOrchestrator {
    pub fn new(api: Arc<dyn MovieApi>, store: Arc<dyn LocalStore>, options: OrchestratorOptions) -> Self {
        let state = State {
            cache: ResultCache::new(options.cache_max_entries),
            in_flight_search: None,
            in_flight_suggest: None,
            last_suggest_term: None,
            debouncer: Debouncer::new(options.debounce),
            suggestions: Vec::new(),
            view: SearchView::default(),
            selected: None,
            details_error: None,
        };
        let favorites = Favorites::load(store.clone());
        let history = WatchHistory::load(store.clone(), options.history_limit);
        let compare = CompareSelection::load(store.clone());

        info!(
            source = api.source_name(),
            favorites = favorites.len(),
            history = history.len(),
            "Search orchestrator ready"
        );

        Self {
            api,
            store,
            options,
            state: Mutex::new(state),
            favorites: Mutex::new(favorites),
            history: Mutex::new(history),
            compare: Mutex::new(compare),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    #[instrument(skip(self))]
    pub async fn search(&self, term: &str, page: u32, type_filter: TypeFilter) -> SearchOutcome {
        if term.trim().is_empty() {
            return SearchOutcome::Skipped;
        }
        let page = page.max(1);

        if let Err(e) = self.store.set(keys::LAST_SEARCH_TERM, term.to_string()) {
            warn!("Failed to remember last search term: {}", e);
        }

        let key = search_key(term, page, type_filter);
        let previous_view = {
            let mut state = self.state();
            if state.in_flight_search.as_deref() == Some(key.as_str()) {
                debug!("Search {} already in flight", key);
                return SearchOutcome::AlreadyInFlight;
            }

            if let Some(cached) = state.cache.get_page(&key) {
                debug!("Cache hit for {}", key);
                // An older request still in flight must not land on top of this
                state.in_flight_search = None;
                state.view = SearchView {
                    term: term.trim().to_string(),
                    page,
                    type_filter,
                    results: cached.results.clone(),
                    total_results: cached.total_results,
                    status: ViewStatus::Ready,
                };
                return SearchOutcome::Cached(cached);
            }

            let previous_view = state.view.clone();
            state.in_flight_search = Some(key.clone());
            state.view.term = term.trim().to_string();
            state.view.page = page;
            state.view.type_filter = type_filter;
            state.view.status = ViewStatus::Loading;
            previous_view
        };
        let in_flight = InFlight::new(self, Marker::Search, key.clone(), Some(previous_view));

        debug!("Cache miss for {}, querying {}", key, self.api.source_name());
        let query = SearchQuery::new(term.trim(), page, type_filter);
        let response = self.api.search(&query).await;

        let mut state = self.state();
        in_flight.complete();
        if state.in_flight_search.as_deref() != Some(key.as_str()) {
            debug!("Discarding stale response for {}", key);
            return SearchOutcome::Superseded;
        }
        state.in_flight_search = None;

        match response {
            Ok(SearchResponse::Found { results, total_results }) => {
                let page_data = ResultPage {
                    results: remove_duplicates_by_imdb_id(results),
                    total_results,
                };
                info!(
                    results = page_data.results.len(),
                    total = total_results,
                    "Search {} returned",
                    key
                );
                state.cache.insert_page(key, page_data.clone());
                state.view.results = page_data.results.clone();
                state.view.total_results = total_results;
                state.view.status = ViewStatus::Ready;
                SearchOutcome::Fetched(page_data)
            }
            Ok(SearchResponse::NotFound { message }) | Err(SourceError::NotFound(message)) => {
                info!("No results for {}: {}", key, message);
                state.view.results.clear();
                state.view.total_results = 0;
                state.view.status = ViewStatus::Empty { message: message.clone() };
                SearchOutcome::NotFound { message }
            }
            Err(e) => {
                warn!("Search {} failed: {}", key, e);
                let error = LoadError::from_listing(e);
                state.view.status = ViewStatus::Failed(error.clone());
                SearchOutcome::Failed(error)
            }
        }
    }

    /// Debounced type-ahead lookup
    ///
    /// Each call supersedes the previous pending one; only the last call in a
    /// burst reaches the API.
    #[instrument(skip(self))]
    pub async fn suggest(&self, term: &str) -> SuggestOutcome {
        let (ticket, delay) = {
            let mut state = self.state();
            (state.debouncer.schedule(), state.debouncer.delay())
        };
        tokio::time::sleep(delay).await;

        let normalized = normalize_term(term);
        let key = suggest_key(term);
        {
            let mut state = self.state();
            if !state.debouncer.is_current(ticket) {
                return SuggestOutcome::Debounced;
            }

            if normalized.is_empty() {
                state.suggestions.clear();
                state.in_flight_suggest = None;
                state.last_suggest_term = None;
                return SuggestOutcome::Cleared;
            }

            if state.last_suggest_term.as_deref() == Some(normalized.as_str())
                || state.in_flight_suggest.as_deref() == Some(normalized.as_str())
            {
                return SuggestOutcome::Unchanged;
            }

            if let Some(cached) = state.cache.get_suggestions(&key) {
                debug!("Cache hit for {}", key);
                state.in_flight_suggest = None;
                state.suggestions = cached.clone();
                state.last_suggest_term = Some(normalized);
                return SuggestOutcome::Cached(cached);
            }

            state.in_flight_suggest = Some(normalized.clone());
        }
        let in_flight = InFlight::new(self, Marker::Suggest, normalized.clone(), None);

        let query = SearchQuery::new(term.trim(), 1, TypeFilter::All);
        let response = self.api.search(&query).await;

        let mut state = self.state();
        in_flight.complete();
        if state.in_flight_suggest.as_deref() != Some(normalized.as_str()) {
            debug!("Discarding stale suggestions for {}", normalized);
            return SuggestOutcome::Discarded;
        }
        state.in_flight_suggest = None;

        match response {
            Ok(SearchResponse::Found { results, .. }) => {
                let mut list = remove_duplicates_by_imdb_id(results);
                list.truncate(self.options.suggestion_limit);
                state.cache.insert_suggestions(key, list.clone());
                state.suggestions = list.clone();
                state.last_suggest_term = Some(normalized);
                SuggestOutcome::Fetched(list)
            }
            Ok(SearchResponse::NotFound { .. }) | Err(SourceError::NotFound(_)) => {
                state.suggestions.clear();
                state.last_suggest_term = Some(normalized);
                SuggestOutcome::Cleared
            }
            Err(e) => {
                warn!("Suggestions for {} failed: {}", normalized, e);
                SuggestOutcome::Failed(LoadError::from_listing(e))
            }
        }
    }

    /// Drop the suggestion list and anything still pending for it
    pub fn clear_suggestions(&self) {
        let mut state = self.state();
        state.debouncer.cancel();
        state.suggestions.clear();
        state.in_flight_suggest = None;
        state.last_suggest_term = None;
    }

    /// Full record for one title; records a history entry on success
    #[instrument(skip(self))]
    pub async fn get_details(&self, imdb_id: &str) -> Result<MovieDetails, LoadError> {
        let details = match self.fetch_details(imdb_id.trim()).await {
            Ok(details) => details,
            Err(error) => {
                self.state().details_error = Some(error.clone());
                return Err(error);
            }
        };

        if let Err(e) = lock(&self.history).record(&details, Utc::now()) {
            warn!("Failed to save watch history: {}", e);
        }
        let mut state = self.state();
        state.selected = Some(details.clone());
        state.details_error = None;
        Ok(details)
    }

    /// Record for an id, without touching history or the open details
    pub async fn lookup(&self, imdb_id: &str) -> Result<MovieDetails, LoadError> {
        self.fetch_details(imdb_id.trim()).await
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetails, LoadError> {
        let key = details_key(imdb_id);
        let cached = self.state().cache.get_details(&key);
        if let Some(details) = cached {
            debug!("Cache hit for {}", key);
            return Ok(details);
        }

        match self.api.details(imdb_id, PlotLength::Full).await {
            Ok(details) => {
                self.state().cache.insert_details(key, details.clone());
                Ok(details)
            }
            Err(e) => {
                warn!("Details for {} failed: {}", imdb_id, e);
                Err(LoadError::from_details(imdb_id, e))
            }
        }
    }

    /// Side-by-side report of the two selected titles
    ///
    /// Both records are fetched together with short plots. A side whose fetch
    /// fails is shown with the listing data already held for it. `None` unless
    /// exactly two titles are selected.
    #[instrument(skip(self))]
    pub async fn compare_details(&self) -> Option<CompareReport> {
        let (first, second) = {
            let compare = lock(&self.compare);
            let (a, b) = compare.pair()?;
            (a.clone(), b.clone())
        };

        let (first_details, second_details) = futures::join!(
            self.api.details(&first.imdb_id, PlotLength::Short),
            self.api.details(&second.imdb_id, PlotLength::Short),
        );

        let resolve = |summary: &SearchResult, fetched: Result<MovieDetails, SourceError>| {
            fetched.unwrap_or_else(|e| {
                warn!("Compare details for {} failed, using listing data: {}", summary.imdb_id, e);
                MovieDetails::from_summary(summary)
            })
        };

        Some(CompareReport::new(
            resolve(&first, first_details),
            resolve(&second, second_details),
        ))
    }

    /// Re-run the search remembered from the previous session
    pub async fn restore_last_search(&self) -> Option<SearchOutcome> {
        let term = self.last_search_term()?;
        info!("Restoring last search '{}'", term);
        Some(self.search(&term, 1, TypeFilter::All).await)
    }

    pub fn last_search_term(&self) -> Option<String> {
        self.store
            .get(keys::LAST_SEARCH_TERM)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn view(&self) -> SearchView {
        self.state().view.clone()
    }

    pub fn suggestions(&self) -> Vec<SearchResult> {
        self.state().suggestions.clone()
    }

    pub fn selected_details(&self) -> Option<MovieDetails> {
        self.state().selected.clone()
    }

    pub fn details_error(&self) -> Option<LoadError> {
        self.state().details_error.clone()
    }

    pub fn close_details(&self) {
        let mut state = self.state();
        state.selected = None;
        state.details_error = None;
    }

    pub fn favorites(&self) -> Vec<SearchResult> {
        lock(&self.favorites).items().to_vec()
    }

    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        lock(&self.favorites).contains(imdb_id)
    }

    /// Returns whether the title is a favorite afterwards
    pub fn toggle_favorite(&self, item: &SearchResult) -> Result<bool, PersistError> {
        lock(&self.favorites).toggle(item)
    }

    pub fn remove_favorite(&self, imdb_id: &str) -> Result<bool, PersistError> {
        lock(&self.favorites).remove(imdb_id)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        lock(&self.history).entries().to_vec()
    }

    pub fn clear_history(&self) -> Result<(), PersistError> {
        lock(&self.history).clear()
    }

    pub fn compare_selection(&self) -> Vec<SearchResult> {
        lock(&self.compare).items().to_vec()
    }

    pub fn add_to_compare(&self, item: &SearchResult) -> Result<bool, PersistError> {
        lock(&self.compare).add(item)
    }

    pub fn remove_from_compare(&self, imdb_id: &str) -> Result<bool, PersistError> {
        lock(&self.compare).remove(imdb_id)
    }

    pub fn toggle_compare(&self, item: &SearchResult) -> Result<CompareChange, PersistError> {
        lock(&self.compare).toggle(item)
    }

    pub fn clear_compare(&self) -> Result<(), PersistError> {
        lock(&self.compare).clear()
    }

    pub fn theme(&self) -> Theme {
        Theme::load(self.store.as_ref())
    }

    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        Theme::toggle(self.store.as_ref())
    }

    pub fn cached_entries(&self) -> usize {
        self.state().cache.len()
    }

    pub fn clear_cache(&self) {
        self.state().cache.clear();
    }
}
