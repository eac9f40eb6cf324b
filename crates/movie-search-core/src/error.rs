use movie_search_config::StoreError;
use movie_search_sources::SourceError;
use serde::Serialize;
use thiserror::Error;

/// Failure surfaced to the front end as a state value
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadError {
    /// The API reported no results; rendered as an empty state
    #[error("{0}")]
    NotFound(String),

    /// Transport or payload failure; the caller may retry
    #[error("network error: {0}")]
    Network(String),

    /// One record could not be loaded; whatever is on screen stays
    #[error("could not load details for {imdb_id}: {message}")]
    DetailsLoad { imdb_id: String, message: String },
}

impl LoadError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Network(_))
    }

    pub(crate) fn from_listing(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(message) => LoadError::NotFound(message),
            other => LoadError::Network(other.to_string()),
        }
    }

    pub(crate) fn from_details(imdb_id: &str, err: SourceError) -> Self {
        LoadError::DetailsLoad {
            imdb_id: imdb_id.to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
