use lru::LruCache;
use movie_search_models::{MovieDetails, SearchResult, TypeFilter};
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::debug;

/// Lower-cased, trimmed form of a search term
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Cache key of one listing page
pub fn search_key(term: &str, page: u32, type_filter: TypeFilter) -> String {
    format!("{}_{}_{}", normalize_term(term), page, type_filter.as_str())
}

pub fn suggest_key(term: &str) -> String {
    format!("suggest_{}", normalize_term(term))
}

pub fn details_key(imdb_id: &str) -> String {
    format!("details_{}", imdb_id.trim())
}

/// One page of listing results with the API's total count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    pub results: Vec<SearchResult>,
    pub total_results: u32,
}

#[derive(Debug, Clone)]
enum CachedValue {
    Page(ResultPage),
    Suggestions(Vec<SearchResult>),
    Details(MovieDetails),
}

/// Session cache of API responses
///
/// Unbounded unless built with a capacity, in which case the least recently
/// used entry is evicted first.
pub struct ResultCache {
    entries: LruCache<String, CachedValue>,
}

impl ResultCache {
    pub fn new(max_entries: Option<usize>) -> Self {
        let entries = match max_entries.and_then(NonZeroUsize::new) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self { entries }
    }

    pub fn get_page(&mut self, key: &str) -> Option<ResultPage> {
        match self.entries.get(key) {
            Some(CachedValue::Page(page)) => Some(page.clone()),
            _ => None,
        }
    }

    pub fn get_suggestions(&mut self, key: &str) -> Option<Vec<SearchResult>> {
        match self.entries.get(key) {
            Some(CachedValue::Suggestions(list)) => Some(list.clone()),
            _ => None,
        }
    }

    pub fn get_details(&mut self, key: &str) -> Option<MovieDetails> {
        match self.entries.get(key) {
            Some(CachedValue::Details(details)) => Some(details.clone()),
            _ => None,
        }
    }

    pub fn insert_page(&mut self, key: String, page: ResultPage) {
        self.insert(key, CachedValue::Page(page));
    }

    pub fn insert_suggestions(&mut self, key: String, list: Vec<SearchResult>) {
        self.insert(key, CachedValue::Suggestions(list));
    }

    pub fn insert_details(&mut self, key: String, details: MovieDetails) {
        self.insert(key, CachedValue::Details(details));
    }

    fn insert(&mut self, key: String, value: CachedValue) {
        if let Some((evicted, _)) = self.entries.push(key.clone(), value) {
            if evicted != key {
                debug!("Cache evicted {}", evicted);
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_search_models::MediaKind;

    fn result(id: &str) -> SearchResult {
        SearchResult {
            imdb_id: id.to_string(),
            title: format!("Title {}", id),
            year: "2001".to_string(),
            poster: None,
            kind: MediaKind::Movie,
        }
    }

    fn page(ids: &[&str], total: u32) -> ResultPage {
        ResultPage {
            results: ids.iter().map(|id| result(id)).collect(),
            total_results: total,
        }
    }

    #[test]
    fn test_keys_are_normalized() {
        assert_eq!(search_key("  Batman ", 1, TypeFilter::All), "batman_1_all");
        assert_eq!(search_key("batman", 2, TypeFilter::Series), "batman_2_series");
        assert_ne!(
            search_key("batman", 1, TypeFilter::All),
            search_key("batman", 1, TypeFilter::Movie)
        );
        assert_eq!(suggest_key("BAT"), "suggest_bat");
        assert_eq!(details_key("tt0372784"), "details_tt0372784");
    }

    #[test]
    fn test_typed_lookups_do_not_cross() {
        let mut cache = ResultCache::new(None);
        cache.insert_page("batman_1_all".to_string(), page(&["tt1"], 1));
        cache.insert_suggestions("suggest_bat".to_string(), vec![result("tt2")]);

        assert!(cache.get_page("batman_1_all").is_some());
        assert!(cache.get_suggestions("batman_1_all").is_none());
        assert!(cache.get_details("suggest_bat").is_none());
        assert_eq!(cache.get_suggestions("suggest_bat").unwrap().len(), 1);
    }

    #[test]
    fn test_unbounded_by_default() {
        let mut cache = ResultCache::new(None);
        for i in 0..500 {
            cache.insert_page(format!("term{}_1_all", i), page(&["tt1"], 1));
        }
        assert_eq!(cache.len(), 500);
        assert!(cache.contains("term0_1_all"));
    }

    #[test]
    fn test_bounded_cache_evicts_least_recently_used() {
        let mut cache = ResultCache::new(Some(2));
        cache.insert_page("a_1_all".to_string(), page(&["tt1"], 1));
        cache.insert_page("b_1_all".to_string(), page(&["tt2"], 1));

        // Touch "a" so "b" becomes the eviction candidate
        assert!(cache.get_page("a_1_all").is_some());
        cache.insert_page("c_1_all".to_string(), page(&["tt3"], 1));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a_1_all"));
        assert!(!cache.contains("b_1_all"));
        assert!(cache.contains("c_1_all"));
    }

    #[test]
    fn test_zero_capacity_means_unbounded() {
        let mut cache = ResultCache::new(Some(0));
        cache.insert_page("a_1_all".to_string(), page(&["tt1"], 1));
        cache.insert_page("b_1_all".to_string(), page(&["tt2"], 1));
        assert_eq!(cache.len(), 2);
    }
}
