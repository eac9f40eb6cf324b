use super::{finish_spinner, print_cards, spinner, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_search_core::{
    find_mood, LoadError, Pagination, SearchOrchestrator, SearchOutcome, SearchView, SortOrder, SuggestOutcome,
    UrlState, YearRange, MOODS, RESULTS_PER_PAGE,
};
use movie_search_models::{SearchResult, TypeFilter};
use serde_json::json;

/// How the current page is arranged before printing
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    pub sort: SortOrder,
    pub years: YearRange,
}

impl ListingOptions {
    pub fn new(sort: SortOrder, from_year: Option<u32>, to_year: Option<u32>) -> Self {
        Self {
            sort,
            years: YearRange::new(from_year, to_year),
        }
    }
}

pub async fn run_search(
    session: &Session,
    term: &str,
    page: u32,
    type_filter: TypeFilter,
    options: &ListingOptions,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Search command started");
    let orchestrator = session.orchestrator()?;
    search_and_render(&orchestrator, term, page, type_filter, options, output).await
}

pub async fn search_and_render(
    orchestrator: &SearchOrchestrator,
    term: &str,
    page: u32,
    type_filter: TypeFilter,
    options: &ListingOptions,
    output: &Output,
) -> Result<()> {
    if term.trim().is_empty() {
        output.warn("Enter a title to search for");
        return Ok(());
    }

    let spinner = spinner(output, format!("Searching for '{}'...", term.trim()));
    let outcome = orchestrator.search(term, page, type_filter).await;
    finish_spinner(spinner);

    render_outcome(orchestrator, outcome, options, output)
}

/// Print whatever the last search produced
pub fn render_outcome(
    orchestrator: &SearchOrchestrator,
    outcome: SearchOutcome,
    options: &ListingOptions,
    output: &Output,
) -> Result<()> {
    match outcome {
        SearchOutcome::Fetched(_) | SearchOutcome::Cached(_) => {
            render_listing(orchestrator, options, output);
            Ok(())
        }
        SearchOutcome::NotFound { message } => {
            if output.is_human() {
                output.warn(message);
                output.println(Pagination::new(1, 0).results_line());
            } else {
                output.json(&json!({
                    "type": "results",
                    "term": orchestrator.view().term,
                    "total_results": 0,
                    "results": [],
                    "message": message,
                }));
            }
            Ok(())
        }
        SearchOutcome::Failed(LoadError::Network(message)) => {
            Err(eyre!("Could not reach the movie service ({}). Check your connection and try again.", message))
        }
        SearchOutcome::Failed(other) => Err(eyre!("{}", other)),
        SearchOutcome::Skipped => {
            output.warn("Enter a title to search for");
            Ok(())
        }
        SearchOutcome::AlreadyInFlight | SearchOutcome::Superseded => {
            tracing::debug!("Newer search owns the listing, nothing to print");
            Ok(())
        }
    }
}

/// The current page as printed: year filter first, then sort order
pub fn arranged_results(view: &SearchView, options: &ListingOptions) -> Vec<SearchResult> {
    let mut results = options.years.filter(view.results.clone());
    options.sort.apply(&mut results);
    results
}

/// Number printed next to the first card of the page
pub fn first_index(view: &SearchView) -> usize {
    ((view.page.max(1) - 1) * RESULTS_PER_PAGE) as usize + 1
}

pub fn render_listing(orchestrator: &SearchOrchestrator, options: &ListingOptions, output: &Output) {
    let view = orchestrator.view();
    let results = arranged_results(&view, options);
    let pagination = view.pagination();

    if !output.is_human() {
        let share = UrlState {
            query: Some(view.term.clone()),
            page: view.page,
            type_filter: view.type_filter,
            movie: None,
        };
        output.json(&json!({
            "type": "results",
            "term": view.term,
            "page": view.page,
            "total_pages": pagination.total_pages(),
            "total_results": view.total_results,
            "type_filter": view.type_filter.as_str(),
            "sort": options.sort.as_str(),
            "results": results,
            "share": share.to_string(),
        }));
        return;
    }

    output.println(output.accent(&pagination.results_line()));
    if results.len() != view.results.len() {
        output.println(output.dim(&format!(
            "{} of {} on this page match the year range",
            results.len(),
            view.results.len()
        )));
    }

    let start = first_index(&view);
    let favorites = orchestrator.favorites();
    let compare = orchestrator.compare_selection();
    print_cards(
        output,
        &results,
        start,
        |id| favorites.iter().any(|f| f.imdb_id == id),
        |id| compare.iter().any(|c| c.imdb_id == id),
    );

    output.println(output.dim(&pagination.page_line()));
}

pub async fn run_suggest(session: &Session, term: &str, output: &Output) -> Result<()> {
    let orchestrator = session.orchestrator()?;
    let outcome = orchestrator.suggest(term).await;

    match outcome {
        SuggestOutcome::Fetched(list) | SuggestOutcome::Cached(list) => {
            if output.is_human() {
                for item in &list {
                    output.println(format!("{} ({})  {}", output.accent(&item.title), item.year, output.dim(&item.imdb_id)));
                }
            } else {
                output.json(&json!({ "type": "suggestions", "term": term, "results": list }));
            }
            Ok(())
        }
        SuggestOutcome::Cleared => {
            output.info("No suggestions");
            Ok(())
        }
        SuggestOutcome::Failed(e) => Err(eyre!("{}", e)),
        SuggestOutcome::Debounced | SuggestOutcome::Unchanged | SuggestOutcome::Discarded => Ok(()),
    }
}

/// Rebuild a shared position: run its search, then open the linked title
pub async fn run_open(session: &Session, url: &str, output: &Output) -> Result<()> {
    let state = UrlState::parse(url);
    tracing::debug!(?state, "Opening shared search");

    if state.query.is_none() && state.movie.is_none() {
        output.warn("Nothing to open: expected q= or movie= in the query string");
        return Ok(());
    }

    let orchestrator = session.orchestrator()?;
    if let Some(query) = &state.query {
        search_and_render(&orchestrator, query, state.page, state.type_filter, &ListingOptions::default(), output)
            .await?;
    }
    if let Some(movie) = &state.movie {
        super::details::show_details(&orchestrator, movie, output).await?;
    }
    Ok(())
}

pub async fn run_mood(session: &Session, mood: Option<&str>, page: u32, output: &Output) -> Result<()> {
    let Some(label) = mood else {
        if output.is_human() {
            for mood in MOODS {
                output.println(format!(
                    "{} {}",
                    output.accent(&format!("{:<8}", mood.label)),
                    output.dim(mood.query)
                ));
            }
        } else {
            let moods: Vec<_> = MOODS
                .iter()
                .map(|m| json!({ "label": m.label, "query": m.query }))
                .collect();
            output.json(&json!({ "type": "moods", "moods": moods }));
        }
        return Ok(());
    };

    let mood = find_mood(label).ok_or_else(|| {
        let labels: Vec<&str> = MOODS.iter().map(|m| m.label).collect();
        eyre!("Unknown mood '{}'. Choose one of: {}", label, labels.join(", "))
    })?;

    let orchestrator = session.orchestrator()?;
    search_and_render(&orchestrator, mood.query, page, TypeFilter::All, &ListingOptions::default(), output).await
}
