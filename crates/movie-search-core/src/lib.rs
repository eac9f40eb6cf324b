pub mod orchestrator;
pub mod cache;
pub mod debounce;
pub mod dedupe;
pub mod error;
pub mod persist;
pub mod favorites;
pub mod history;
pub mod compare;
pub mod theme;
pub mod browse;
pub mod url_state;
pub mod view;
pub mod export;

pub use dedupe::remove_duplicates_by_imdb_id;

pub use orchestrator::{OrchestratorOptions, SearchOrchestrator, SearchOutcome, SuggestOutcome};
pub use cache::{ResultCache, ResultPage};
pub use error::{LoadError, PersistError};
pub use compare::{CompareChange, CompareReport, CompareRow, Verdict};
pub use theme::Theme;
pub use browse::{find_mood, Mood, Pagination, SortOrder, YearRange, MOODS, RESULTS_PER_PAGE};
pub use url_state::UrlState;
pub use view::{SearchView, ViewStatus};
pub use export::{export_details, DocumentRenderer, ExportError, ExportedFiles, MarkdownRenderer};
