use super::compare::print_report;
use super::details::show_details;
use super::search::{arranged_results, first_index, render_listing, render_outcome, search_and_render, ListingOptions};
use super::{print_cards, report_fault, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_search_core::{find_mood, CompareChange, SearchOrchestrator, SortOrder, SuggestOutcome, UrlState, YearRange};
use movie_search_models::{SearchResult, TypeFilter};
use std::io::BufRead;

const HELP: &str = "\
Commands:
  search <term>        search titles (alias: s)
  next | prev          move between pages
  page <n>             jump to a page
  type <filter>        all, movie, series or episode
  sort <order>         relevance, title-asc, title-desc, year-newest, year-oldest
  years [from] [to]    limit the current page to a year range; no arguments resets it
  open <n|id>          show details for a listed result or an IMDb id
  fav <n|id>           add or remove a favorite
  compare [n|id]       pick a title for comparison; alone, compares the picks
  suggest <term>       type-ahead suggestions
  mood <label>         search by mood preset
  favorites | history  saved lists
  share                print the query string for the current position
  theme                switch between dark and light
  clear                forget suggestions and cached responses
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Empty,
    Search(String),
    Next,
    Previous,
    Page(u32),
    Type(TypeFilter),
    Sort(SortOrder),
    Years(Option<u32>, Option<u32>),
    Open(String),
    Favorite(String),
    Compare(Option<String>),
    Suggest(String),
    Mood(String),
    Favorites,
    History,
    Share,
    Theme,
    Clear,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "search" | "s" => ShellCommand::Search(rest.to_string()),
        "next" | "n" => ShellCommand::Next,
        "prev" | "previous" | "p" => ShellCommand::Previous,
        "page" => match rest.parse::<u32>() {
            Ok(page) if page >= 1 => ShellCommand::Page(page),
            _ => ShellCommand::Invalid(format!("Not a page number: '{}'", rest)),
        },
        "type" => match rest.parse::<TypeFilter>() {
            Ok(filter) => ShellCommand::Type(filter),
            Err(e) => ShellCommand::Invalid(e),
        },
        "sort" => match rest.parse::<SortOrder>() {
            Ok(order) => ShellCommand::Sort(order),
            Err(e) => ShellCommand::Invalid(e),
        },
        "years" => {
            let mut bounds = rest.split_whitespace().map(|y| y.parse::<u32>());
            match (bounds.next(), bounds.next(), bounds.next()) {
                (None, None, None) => ShellCommand::Years(None, None),
                (Some(Ok(from)), None, None) => ShellCommand::Years(Some(from), None),
                (Some(Ok(from)), Some(Ok(to)), None) => ShellCommand::Years(Some(from), Some(to)),
                _ => ShellCommand::Invalid(format!("Expected 'years [from] [to]', got '{}'", rest)),
            }
        }
        "open" | "o" if !rest.is_empty() => ShellCommand::Open(rest.to_string()),
        "fav" | "favorite" if !rest.is_empty() => ShellCommand::Favorite(rest.to_string()),
        "compare" if rest.is_empty() => ShellCommand::Compare(None),
        "compare" => ShellCommand::Compare(Some(rest.to_string())),
        "suggest" => ShellCommand::Suggest(rest.to_string()),
        "mood" if !rest.is_empty() => ShellCommand::Mood(rest.to_string()),
        "favorites" | "favs" => ShellCommand::Favorites,
        "history" => ShellCommand::History,
        "share" => ShellCommand::Share,
        "theme" => ShellCommand::Theme,
        "clear" => ShellCommand::Clear,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "open" | "o" | "fav" | "favorite" | "mood" => ShellCommand::Invalid(format!("'{}' needs an argument", word)),
        _ => ShellCommand::Invalid(format!("Unknown command '{}'. Type 'help' for a list", word)),
    }
}

/// Listing preferences that persist between shell commands
#[derive(Default)]
struct ShellState {
    type_filter: TypeFilter,
    options: ListingOptions,
}

pub async fn run_shell(session: &Session, output: &Output) -> Result<()> {
    let orchestrator = session.orchestrator()?;
    let mut output = output.clone();
    let mut state = ShellState::default();

    output.println(output.accent("Marquee shell"));
    output.println(output.dim("Type 'help' for commands, 'quit' to leave"));

    if let Some(outcome) = orchestrator.restore_last_search().await {
        let term = orchestrator.view().term;
        output.info(format!("Restored last search: {}", term));
        if let Err(e) = render_outcome(&orchestrator, outcome, &state.options, &output) {
            report_fault(&e, &output);
        }
    }

    loop {
        output.prompt("marquee> ")?;
        let line = match tokio::task::spawn_blocking(read_line).await?? {
            Some(line) => line,
            None => break,
        };

        let command = parse_command(&line);
        tracing::debug!(?command, "Shell command");
        match command {
            ShellCommand::Quit => break,
            ShellCommand::Theme => match orchestrator.toggle_theme() {
                Ok(theme) => {
                    output = output.with_theme(theme);
                    output.success(format!("Switched to {} theme", theme));
                }
                Err(e) => report_fault(&eyre!("{}", e), &output),
            },
            command => {
                if let Err(e) = execute(&orchestrator, &mut state, command, &output).await {
                    report_fault(&e, &output);
                }
            }
        }
    }

    output.println("Bye");
    Ok(())
}

/// `None` at end of input
fn read_line() -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    Ok((read > 0).then_some(line))
}

async fn execute(
    orchestrator: &SearchOrchestrator,
    state: &mut ShellState,
    command: ShellCommand,
    output: &Output,
) -> Result<()> {
    match command {
        ShellCommand::Empty | ShellCommand::Quit | ShellCommand::Theme => Ok(()),
        ShellCommand::Search(term) => {
            search_and_render(orchestrator, &term, 1, state.type_filter, &state.options, output).await
        }
        ShellCommand::Next | ShellCommand::Previous | ShellCommand::Page(_) => {
            let view = orchestrator.view();
            if view.term.is_empty() {
                output.warn("Search for something first");
                return Ok(());
            }
            let pagination = view.pagination();
            let target = match command {
                ShellCommand::Next => pagination.next(),
                ShellCommand::Previous => pagination.previous(),
                ShellCommand::Page(page) => page.min(pagination.total_pages().max(1)),
                _ => view.page,
            };
            if target == view.page {
                output.info(pagination.page_line());
                return Ok(());
            }
            search_and_render(orchestrator, &view.term, target, view.type_filter, &state.options, output).await
        }
        ShellCommand::Type(filter) => {
            state.type_filter = filter;
            let term = orchestrator.view().term;
            if term.is_empty() {
                output.info(format!("Type filter set to {}", filter));
                return Ok(());
            }
            search_and_render(orchestrator, &term, 1, filter, &state.options, output).await
        }
        ShellCommand::Sort(order) => {
            state.options.sort = order;
            relist(orchestrator, state, output);
            Ok(())
        }
        ShellCommand::Years(from, to) => {
            state.options.years = YearRange::new(from, to);
            relist(orchestrator, state, output);
            Ok(())
        }
        ShellCommand::Open(reference) => {
            let item = resolve(orchestrator, state, &reference).await?;
            show_details(orchestrator, &item.imdb_id, output).await
        }
        ShellCommand::Favorite(reference) => {
            let item = resolve(orchestrator, state, &reference).await?;
            if orchestrator.toggle_favorite(&item).map_err(|e| eyre!("{}", e))? {
                output.success(format!("Added {} to favorites", item.title));
            } else {
                output.success(format!("Removed {} from favorites", item.title));
            }
            Ok(())
        }
        ShellCommand::Compare(Some(reference)) => {
            let item = resolve(orchestrator, state, &reference).await?;
            match orchestrator.toggle_compare(&item).map_err(|e| eyre!("{}", e))? {
                CompareChange::Added => output.success(format!("Picked {} for comparison", item.title)),
                CompareChange::Removed => output.success(format!("Dropped {} from comparison", item.title)),
                CompareChange::Full => output.warn("Two titles are already picked. Drop one first"),
            }
            Ok(())
        }
        ShellCommand::Compare(None) => {
            match orchestrator.compare_details().await {
                Some(report) => print_report(&report, output),
                None => output.info(format!(
                    "Pick two titles first ({} picked)",
                    orchestrator.compare_selection().len()
                )),
            }
            Ok(())
        }
        ShellCommand::Suggest(term) => {
            match orchestrator.suggest(&term).await {
                SuggestOutcome::Fetched(list) | SuggestOutcome::Cached(list) => print_cards(
                    output,
                    &list,
                    1,
                    |id| orchestrator.is_favorite(id),
                    |_| false,
                ),
                SuggestOutcome::Cleared => output.info("No suggestions"),
                SuggestOutcome::Failed(e) => return Err(eyre!("{}", e)),
                SuggestOutcome::Debounced | SuggestOutcome::Unchanged | SuggestOutcome::Discarded => {}
            }
            Ok(())
        }
        ShellCommand::Mood(label) => {
            let mood = find_mood(&label).ok_or_else(|| eyre!("Unknown mood '{}'", label))?;
            output.info(format!("{}: {}", mood.label, mood.query));
            search_and_render(orchestrator, mood.query, 1, state.type_filter, &state.options, output).await
        }
        ShellCommand::Favorites => {
            let favorites = orchestrator.favorites();
            if favorites.is_empty() {
                output.info("No favorites yet");
            } else {
                print_cards(output, &favorites, 1, |_| true, |_| false);
            }
            Ok(())
        }
        ShellCommand::History => {
            let history = orchestrator.history();
            if history.is_empty() {
                output.info("Nothing viewed yet");
            }
            for entry in history {
                output.println(format!("  {} ({}) {}", entry.title, entry.year, output.dim(&entry.imdb_id)));
            }
            Ok(())
        }
        ShellCommand::Share => {
            let view = orchestrator.view();
            let share = UrlState {
                query: (!view.term.is_empty()).then(|| view.term.clone()),
                page: view.page.max(1),
                type_filter: view.type_filter,
                movie: orchestrator.selected_details().map(|d| d.imdb_id),
            };
            output.println(share.to_string());
            Ok(())
        }
        ShellCommand::Clear => {
            orchestrator.clear_suggestions();
            orchestrator.clear_cache();
            output.success("Suggestions and cached responses cleared");
            Ok(())
        }
        ShellCommand::Help => {
            output.println(HELP);
            Ok(())
        }
        ShellCommand::Invalid(message) => {
            output.warn(message);
            Ok(())
        }
    }
}

fn relist(orchestrator: &SearchOrchestrator, state: &ShellState, output: &Output) {
    if orchestrator.view().term.is_empty() {
        output.info("Listing options saved for the next search");
    } else {
        render_listing(orchestrator, &state.options, output);
    }
}

/// A listed number refers to the card printed with that number; anything else is an IMDb id
async fn resolve(orchestrator: &SearchOrchestrator, state: &ShellState, reference: &str) -> Result<SearchResult> {
    let reference = reference.trim();
    let view = orchestrator.view();
    let listing = arranged_results(&view, &state.options);

    if let Ok(number) = reference.parse::<usize>() {
        return number
            .checked_sub(first_index(&view))
            .and_then(|index| listing.get(index))
            .cloned()
            .ok_or_else(|| eyre!("No result numbered {} on this page", number));
    }

    if let Some(item) = listing.iter().find(|r| r.imdb_id == reference) {
        return Ok(item.clone());
    }

    let details = orchestrator.lookup(reference).await.map_err(|e| eyre!("{}", e))?;
    Ok(details.summary())
}
