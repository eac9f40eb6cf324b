//! Listing helpers that need no network: ordering, year filtering,
//! pagination and mood presets.

use movie_search_models::SearchResult;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const RESULTS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Order returned by the API
    #[default]
    Relevance,
    TitleAsc,
    TitleDesc,
    YearNewest,
    YearOldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::TitleAsc => "title-asc",
            SortOrder::TitleDesc => "title-desc",
            SortOrder::YearNewest => "year-newest",
            SortOrder::YearOldest => "year-oldest",
        }
    }

    /// Stable sort; titles without a readable year go last for year orders
    pub fn apply(&self, results: &mut [SearchResult]) {
        match self {
            SortOrder::Relevance => {}
            SortOrder::TitleAsc => results.sort_by_key(|r| r.title.to_lowercase()),
            SortOrder::TitleDesc => {
                results.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()))
            }
            SortOrder::YearNewest => {
                results.sort_by(|a, b| by_year(a, b, |x, y| y.cmp(&x)))
            }
            SortOrder::YearOldest => {
                results.sort_by(|a, b| by_year(a, b, |x, y| x.cmp(&y)))
            }
        }
    }
}

fn by_year(a: &SearchResult, b: &SearchResult, cmp: impl Fn(u32, u32) -> Ordering) -> Ordering {
    match (a.release_year(), b.release_year()) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "relevance" => Ok(SortOrder::Relevance),
            "title-asc" => Ok(SortOrder::TitleAsc),
            "title-desc" => Ok(SortOrder::TitleDesc),
            "year-newest" => Ok(SortOrder::YearNewest),
            "year-oldest" => Ok(SortOrder::YearOldest),
            other => Err(format!(
                "Unknown sort order '{}'. Expected relevance, title-asc, title-desc, year-newest or year-oldest",
                other
            )),
        }
    }
}

/// Inclusive release year bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearRange {
    pub from: Option<u32>,
    pub to: Option<u32>,
}

impl YearRange {
    pub fn new(from: Option<u32>, to: Option<u32>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, result: &SearchResult) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(year) = result.release_year() else {
            return false;
        };
        self.from.map_or(true, |from| year >= from) && self.to.map_or(true, |to| year <= to)
    }

    pub fn filter(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        if self.is_unbounded() {
            return results;
        }
        results.into_iter().filter(|r| self.contains(r)).collect()
    }
}

/// Page position within a result set of `total_results`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_results: u32,
}

impl Pagination {
    pub fn new(page: u32, total_results: u32) -> Self {
        Self { page: page.max(1), total_results }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_results.div_ceil(RESULTS_PER_PAGE)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn next(&self) -> u32 {
        self.page.saturating_add(1).min(self.total_pages().max(1))
    }

    pub fn previous(&self) -> u32 {
        self.page.saturating_sub(1).max(1)
    }

    pub fn results_line(&self) -> String {
        format!("Found {} results", self.total_results)
    }

    pub fn page_line(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }
}

/// Canned query behind a mood button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood {
    pub label: &'static str,
    pub query: &'static str,
}

pub const MOODS: &[Mood] = &[
    Mood { label: "Funny", query: "comedy" },
    Mood { label: "Scary", query: "horror" },
    Mood { label: "Romance", query: "romance" },
    Mood { label: "Action", query: "action thriller" },
    Mood { label: "Mystery", query: "mystery detective" },
    Mood { label: "Sci-Fi", query: "science fiction space" },
    Mood { label: "Drama", query: "drama emotional" },
    Mood { label: "Family", query: "family animation" },
];

pub fn find_mood(label: &str) -> Option<&'static Mood> {
    let label = label.trim();
    MOODS.iter().find(|m| m.label.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_search_models::MediaKind;

    fn result(title: &str, year: &str) -> SearchResult {
        SearchResult {
            imdb_id: format!("tt_{}", title),
            title: title.to_string(),
            year: year.to_string(),
            poster: None,
            kind: MediaKind::Movie,
        }
    }

    fn titles(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_sort_orders() {
        let base = vec![
            result("batman", "1989"),
            result("Alien", "N/A"),
            result("Casablanca", "1942"),
            result("Dune", "2021"),
        ];

        let mut sorted = base.clone();
        SortOrder::Relevance.apply(&mut sorted);
        assert_eq!(titles(&sorted), titles(&base));

        let mut sorted = base.clone();
        SortOrder::TitleAsc.apply(&mut sorted);
        assert_eq!(titles(&sorted), vec!["Alien", "batman", "Casablanca", "Dune"]);

        let mut sorted = base.clone();
        SortOrder::TitleDesc.apply(&mut sorted);
        assert_eq!(titles(&sorted), vec!["Dune", "Casablanca", "batman", "Alien"]);

        let mut sorted = base.clone();
        SortOrder::YearNewest.apply(&mut sorted);
        assert_eq!(titles(&sorted), vec!["Dune", "batman", "Casablanca", "Alien"]);

        let mut sorted = base;
        SortOrder::YearOldest.apply(&mut sorted);
        assert_eq!(titles(&sorted), vec!["Casablanca", "batman", "Dune", "Alien"]);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("year-newest".parse::<SortOrder>(), Ok(SortOrder::YearNewest));
        assert_eq!("".parse::<SortOrder>(), Ok(SortOrder::Relevance));
        assert!("rating".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_year_range_inclusive() {
        let results = vec![
            result("a", "1999"),
            result("b", "2000"),
            result("c", "2010"),
            result("d", "2011"),
            result("e", "N/A"),
        ];

        let filtered = YearRange::new(Some(2000), Some(2010)).filter(results.clone());
        assert_eq!(titles(&filtered), vec!["b", "c"]);

        let filtered = YearRange::new(None, Some(1999)).filter(results.clone());
        assert_eq!(titles(&filtered), vec!["a"]);

        let filtered = YearRange::default().filter(results);
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn test_pagination_lines() {
        let pagination = Pagination::new(1, 57);
        assert_eq!(pagination.total_pages(), 6);
        assert_eq!(pagination.results_line(), "Found 57 results");
        assert_eq!(pagination.page_line(), "Page 1 of 6");
        assert!(pagination.has_next());
        assert!(!pagination.has_previous());
        assert_eq!(pagination.previous(), 1);

        let last = Pagination::new(6, 57);
        assert_eq!(last.next(), 6);
        assert_eq!(last.previous(), 5);

        let exact = Pagination::new(1, 20);
        assert_eq!(exact.total_pages(), 2);

        let empty = Pagination::new(1, 0);
        assert_eq!(empty.total_pages(), 0);
        assert_eq!(empty.next(), 1);
    }

    #[test]
    fn test_pagination_at_largest_page() {
        let far = Pagination::new(u32::MAX, u32::MAX);
        assert_eq!(far.next(), far.total_pages());
        assert!(!far.has_next());
        assert_eq!(far.previous(), u32::MAX - 1);
    }

    #[test]
    fn test_find_mood() {
        assert_eq!(find_mood("sci-fi").map(|m| m.query), Some("science fiction space"));
        assert_eq!(find_mood("Funny").map(|m| m.query), Some("comedy"));
        assert!(find_mood("bored").is_none());
        assert_eq!(MOODS.len(), 8);
    }
}
