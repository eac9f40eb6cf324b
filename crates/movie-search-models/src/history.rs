use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::details::MovieDetails;

/// One viewed title in the watch history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub viewed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_details(details: &MovieDetails, viewed_at: DateTime<Utc>) -> Self {
        Self {
            imdb_id: details.imdb_id.clone(),
            title: details.title.clone(),
            year: details.year.clone(),
            poster: details.poster.clone(),
            viewed_at,
        }
    }
}
