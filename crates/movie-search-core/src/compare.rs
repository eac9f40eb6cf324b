use crate::error::PersistError;
use crate::persist::{load_list, save_list};
use movie_search_config::{keys, LocalStore};
use movie_search_models::{MovieDetails, SearchResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

pub const MAX_COMPARE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareChange {
    Added,
    Removed,
    /// Selection already holds two titles
    Full,
}

/// Up to two titles picked for side-by-side comparison
pub struct CompareSelection {
    store: Arc<dyn LocalStore>,
    items: Vec<SearchResult>,
}

impl CompareSelection {
    pub fn load(store: Arc<dyn LocalStore>) -> Self {
        let mut items: Vec<SearchResult> = Vec::new();
        for item in load_list::<SearchResult>(store.as_ref(), keys::COMPARE_LIST) {
            if items.len() < MAX_COMPARE && !items.iter().any(|i| i.imdb_id == item.imdb_id) {
                items.push(item);
            }
        }
        Self { store, items }
    }

    pub fn items(&self) -> &[SearchResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPARE
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.items.iter().any(|i| i.imdb_id == imdb_id)
    }

    /// Returns false when the title is already present or the selection is full
    pub fn add(&mut self, item: &SearchResult) -> Result<bool, PersistError> {
        if self.contains(&item.imdb_id) || self.is_full() {
            debug!("Compare add of {} ignored", item.imdb_id);
            return Ok(false);
        }
        self.items.push(item.clone());
        self.save()?;
        Ok(true)
    }

    pub fn remove(&mut self, imdb_id: &str) -> Result<bool, PersistError> {
        let before = self.items.len();
        self.items.retain(|i| i.imdb_id != imdb_id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn toggle(&mut self, item: &SearchResult) -> Result<CompareChange, PersistError> {
        if self.contains(&item.imdb_id) {
            self.remove(&item.imdb_id)?;
            Ok(CompareChange::Removed)
        } else if self.add(item)? {
            Ok(CompareChange::Added)
        } else {
            Ok(CompareChange::Full)
        }
    }

    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.items.clear();
        self.save()
    }

    /// Both selected titles, in selection order
    pub fn pair(&self) -> Option<(&SearchResult, &SearchResult)> {
        match self.items.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    fn save(&self) -> Result<(), PersistError> {
        save_list(self.store.as_ref(), keys::COMPARE_LIST, &self.items)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    FirstWins,
    SecondWins,
    Tie,
    /// At least one side has no usable rating
    Undecided,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareRow {
    pub label: &'static str,
    pub first: String,
    pub second: String,
}

/// Side-by-side view of two titles
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub first: MovieDetails,
    pub second: MovieDetails,
    pub rows: Vec<CompareRow>,
    pub verdict: Verdict,
}

const MISSING: &str = "N/A";

impl CompareReport {
    pub fn new(first: MovieDetails, second: MovieDetails) -> Self {
        let rows = vec![
            row("Year", Some(&first.year), Some(&second.year)),
            row("Rating", first.imdb_rating.as_ref(), second.imdb_rating.as_ref()),
            row("Runtime", first.runtime.as_ref(), second.runtime.as_ref()),
            row("Genre", first.genre.as_ref(), second.genre.as_ref()),
            row("Director", first.director.as_ref(), second.director.as_ref()),
            row("Awards", first.awards.as_ref(), second.awards.as_ref()),
            row("Language", first.language.as_ref(), second.language.as_ref()),
            row("Votes", first.imdb_votes.as_ref(), second.imdb_votes.as_ref()),
        ];
        let verdict = verdict(first.rating_value(), second.rating_value());
        Self { first, second, rows, verdict }
    }

    /// Title of the higher rated side, if there is one
    pub fn winner(&self) -> Option<&MovieDetails> {
        match self.verdict {
            Verdict::FirstWins => Some(&self.first),
            Verdict::SecondWins => Some(&self.second),
            Verdict::Tie | Verdict::Undecided => None,
        }
    }

    pub fn verdict_line(&self) -> String {
        match self.verdict {
            Verdict::FirstWins | Verdict::SecondWins => match self.winner() {
                Some(winner) => format!("{} has the higher rating", winner.title),
                None => String::new(),
            },
            Verdict::Tie => "Both titles have the same rating".to_string(),
            Verdict::Undecided => "Not enough rating data to pick a winner".to_string(),
        }
    }
}

fn row(label: &'static str, first: Option<&String>, second: Option<&String>) -> CompareRow {
    let show = |v: Option<&String>| {
        v.filter(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| MISSING.to_string())
    };
    CompareRow {
        label,
        first: show(first),
        second: show(second),
    }
}

fn verdict(first: Option<f32>, second: Option<f32>) -> Verdict {
    match (first, second) {
        (Some(a), Some(b)) if a > b => Verdict::FirstWins,
        (Some(a), Some(b)) if b > a => Verdict::SecondWins,
        (Some(_), Some(_)) => Verdict::Tie,
        _ => Verdict::Undecided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_search_config::MemoryStore;
    use movie_search_models::MediaKind;

    fn result(id: &str) -> SearchResult {
        SearchResult {
            imdb_id: id.to_string(),
            title: format!("Title {}", id),
            year: "2008".to_string(),
            poster: None,
            kind: MediaKind::Movie,
        }
    }

    fn rated(id: &str, rating: Option<&str>) -> MovieDetails {
        let mut details = MovieDetails::from_summary(&result(id));
        details.imdb_rating = rating.map(str::to_string);
        details
    }

    #[test]
    fn test_third_add_is_noop() {
        let mut selection = CompareSelection::load(Arc::new(MemoryStore::new()));
        assert!(selection.add(&result("tt1")).unwrap());
        assert!(selection.add(&result("tt2")).unwrap());
        assert!(!selection.add(&result("tt3")).unwrap());
        assert_eq!(selection.len(), 2);
        assert!(!selection.contains("tt3"));
    }

    #[test]
    fn test_add_present_is_noop() {
        let mut selection = CompareSelection::load(Arc::new(MemoryStore::new()));
        selection.add(&result("tt1")).unwrap();
        assert!(!selection.add(&result("tt1")).unwrap());
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut selection = CompareSelection::load(Arc::new(MemoryStore::new()));
        assert_eq!(selection.toggle(&result("tt1")).unwrap(), CompareChange::Added);
        assert_eq!(selection.toggle(&result("tt2")).unwrap(), CompareChange::Added);
        assert_eq!(selection.toggle(&result("tt3")).unwrap(), CompareChange::Full);
        assert_eq!(selection.toggle(&result("tt1")).unwrap(), CompareChange::Removed);
        assert_eq!(selection.len(), 1);

        selection.clear().unwrap();
        assert!(selection.is_empty());
        assert!(selection.pair().is_none());
    }

    #[test]
    fn test_selection_is_persisted() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        let mut selection = CompareSelection::load(store.clone());
        selection.add(&result("tt1")).unwrap();
        selection.add(&result("tt2")).unwrap();

        let restored = CompareSelection::load(store);
        let (first, second) = restored.pair().unwrap();
        assert_eq!(first.imdb_id, "tt1");
        assert_eq!(second.imdb_id, "tt2");
    }

    #[test]
    fn test_verdict_by_rating() {
        let report = CompareReport::new(rated("tt1", Some("8.2")), rated("tt2", Some("7.0")));
        assert_eq!(report.verdict, Verdict::FirstWins);
        assert_eq!(report.verdict_line(), "Title tt1 has the higher rating");

        let report = CompareReport::new(rated("tt1", Some("6.5")), rated("tt2", Some("9.0")));
        assert_eq!(report.verdict, Verdict::SecondWins);

        let report = CompareReport::new(rated("tt1", Some("7.5")), rated("tt2", Some("7.5")));
        assert_eq!(report.verdict, Verdict::Tie);
        assert!(report.winner().is_none());

        let report = CompareReport::new(rated("tt1", Some("7.5")), rated("tt2", None));
        assert_eq!(report.verdict, Verdict::Undecided);
    }

    #[test]
    fn test_rows_cover_fields_with_placeholder() {
        let report = CompareReport::new(rated("tt1", Some("8.0")), rated("tt2", None));
        let labels: Vec<&str> = report.rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec!["Year", "Rating", "Runtime", "Genre", "Director", "Awards", "Language", "Votes"]
        );
        assert_eq!(report.rows[1].first, "8.0");
        assert_eq!(report.rows[1].second, "N/A");
        assert_eq!(report.rows[0].first, "2008");
    }
}
