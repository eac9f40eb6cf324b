use movie_search_models::SearchResult;
use std::collections::HashSet;

/// Drop repeated identifiers, keeping the first occurrence and the original order
///
/// The API occasionally lists the same title twice on one page.
pub fn remove_duplicates_by_imdb_id(items: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.imdb_id.clone()))
        .collect()
}
