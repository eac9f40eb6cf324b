use serde::{Deserialize, Serialize};
use crate::media::MediaKind;
use crate::search_result::SearchResult;

/// Full record for one title
///
/// Every optional field is `None` when the API reported "N/A".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub kind: MediaKind,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
}

impl MovieDetails {
    /// Numeric rating, if the API reported a parsable one
    pub fn rating_value(&self) -> Option<f32> {
        self.imdb_rating.as_deref().and_then(|r| r.trim().parse::<f32>().ok())
    }

    /// The listing-sized view of this record
    pub fn summary(&self) -> SearchResult {
        SearchResult {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
            kind: self.kind,
        }
    }

    /// Details record carrying only what a listing entry knows
    pub fn from_summary(result: &SearchResult) -> Self {
        Self {
            imdb_id: result.imdb_id.clone(),
            title: result.title.clone(),
            year: result.year.clone(),
            poster: result.poster.clone(),
            kind: result.kind,
            rated: None,
            released: None,
            runtime: None,
            genre: None,
            director: None,
            writer: None,
            actors: None,
            plot: None,
            language: None,
            country: None,
            awards: None,
            imdb_rating: None,
            imdb_votes: None,
        }
    }
}
