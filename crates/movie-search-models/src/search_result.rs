use serde::{Deserialize, Serialize};
use crate::media::MediaKind;

/// One entry of a listing query
///
/// `year` is kept as the API reports it ("2005", "2008–2013", "2019–").
/// Use [`SearchResult::release_year`] for numeric comparisons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub kind: MediaKind,
}

impl SearchResult {
    pub fn release_year(&self) -> Option<u32> {
        leading_year(&self.year)
    }
}

/// Parse the leading four-digit year out of an API year string
pub fn leading_year(year: &str) -> Option<u32> {
    let digits: String = year.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}
