use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, compare, config, details, favorites, history, search, shell, theme, Session};
use movie_search_core::SortOrder;
use movie_search_models::TypeFilter;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - Search movies and shows, keep favorites, compare titles")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search titles by name
    #[command(long_about = "Search the movie database. Results are shown ten per page; use --page to move through them and --sort / --from-year / --to-year to arrange the current page.")]
    Search {
        /// Search term
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Show type-ahead suggestions for a partial term
    Suggest {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// Show full details for a title and add it to the watch history
    Details {
        /// IMDb identifier, e.g. tt0372784
        imdb_id: String,
    },
    /// Restore a shared search from its query string (?q=..&page=..&type=..&movie=..)
    Open {
        url: String,
    },
    /// Search by mood preset; lists the presets when no mood is given
    Mood {
        mood: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Manage favorite titles
    Favorites {
        #[command(subcommand)]
        cmd: Option<FavoritesCommands>,
    },
    /// Recently viewed titles
    History {
        #[command(subcommand)]
        cmd: Option<HistoryCommands>,
    },
    /// Compare two titles side by side
    Compare {
        #[command(subcommand)]
        cmd: Option<CompareCommands>,
    },
    /// Save a details sheet and poster for a title
    Export {
        imdb_id: String,

        /// Output directory (defaults to the configured export directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Show or switch the color theme
    Theme {
        #[command(subcommand)]
        cmd: Option<ThemeCommands>,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear saved state or exported files
    #[command(long_about = "Clear saved data. Use --state to reset favorites, history, compare list, theme and the last search, --exports to delete exported sheets, or --all for both.")]
    Clear {
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        state: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        exports: bool,
    },
    /// Interactive session that keeps results cached between commands
    Shell,
}

#[derive(clap::Args, Clone)]
struct ListingArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// all, movie, series or episode
    #[arg(long = "type", default_value = "all")]
    kind: TypeFilter,

    /// relevance, title-asc, title-desc, year-newest or year-oldest
    #[arg(long, default_value = "relevance")]
    sort: SortOrder,

    #[arg(long, value_name = "YEAR")]
    from_year: Option<u32>,

    #[arg(long, value_name = "YEAR")]
    to_year: Option<u32>,
}

impl ListingArgs {
    fn into_options(self) -> (u32, TypeFilter, search::ListingOptions) {
        (
            self.page,
            self.kind,
            search::ListingOptions::new(self.sort, self.from_year, self.to_year),
        )
    }
}

#[derive(Subcommand)]
enum FavoritesCommands {
    List,
    /// Add the title if absent, remove it if present
    Toggle { imdb_id: String },
}

#[derive(Subcommand)]
enum HistoryCommands {
    List,
    Clear,
}

#[derive(Subcommand)]
enum CompareCommands {
    /// Select a title (at most two)
    Add { imdb_id: String },
    Remove { imdb_id: String },
    Clear,
    /// Fetch both selected titles and print the comparison
    Show,
}

#[derive(Subcommand)]
enum ThemeCommands {
    Show,
    Toggle,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the API key in the config file
    SetKey { key: String },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    if let Err(e) = run(cli.command, &output).await {
        tracing::error!(error = ?e, "Command failed");
        commands::report_fault(&e, &output);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Commands, output: &output::Output) -> color_eyre::Result<()> {
    // Works without opening the state file so a corrupt one can still be reset
    if let Commands::Clear { all, state, exports } = command {
        return clear::run_clear(all, state, exports, output);
    }

    let session = Session::open()?;
    let output = &output.with_theme(session.theme());

    match command {
        Commands::Search { term, listing } => {
            let (page, kind, options) = listing.into_options();
            search::run_search(&session, &term.join(" "), page, kind, &options, output).await
        }
        Commands::Suggest { term } => search::run_suggest(&session, &term.join(" "), output).await,
        Commands::Details { imdb_id } => details::run_details(&session, &imdb_id, output).await,
        Commands::Open { url } => search::run_open(&session, &url, output).await,
        Commands::Mood { mood, page } => search::run_mood(&session, mood.as_deref(), page, output).await,
        Commands::Favorites { cmd } => match cmd.unwrap_or(FavoritesCommands::List) {
            FavoritesCommands::List => favorites::run_list(&session, output),
            FavoritesCommands::Toggle { imdb_id } => favorites::run_toggle(&session, &imdb_id, output).await,
        },
        Commands::History { cmd } => match cmd.unwrap_or(HistoryCommands::List) {
            HistoryCommands::List => history::run_list(&session, output),
            HistoryCommands::Clear => history::run_clear(&session, output),
        },
        Commands::Compare { cmd } => match cmd.unwrap_or(CompareCommands::Show) {
            CompareCommands::Add { imdb_id } => compare::run_add(&session, &imdb_id, output).await,
            CompareCommands::Remove { imdb_id } => compare::run_remove(&session, &imdb_id, output),
            CompareCommands::Clear => compare::run_clear(&session, output),
            CompareCommands::Show => compare::run_show(&session, output).await,
        },
        Commands::Export { imdb_id, dir } => details::run_export(&session, &imdb_id, dir, output).await,
        Commands::Theme { cmd } => match cmd.unwrap_or(ThemeCommands::Show) {
            ThemeCommands::Show => theme::run_show(&session, output),
            ThemeCommands::Toggle => theme::run_toggle(&session, output),
        },
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show { full: false }) {
            ConfigCommands::Show { full } => config::run_show(&session, full, output),
            ConfigCommands::SetKey { key } => config::run_set_key(&session, &key, output),
        },
        Commands::Clear { .. } => Ok(()),
        Commands::Shell => shell::run_shell(&session, output).await,
    }
}
