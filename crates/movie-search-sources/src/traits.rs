use async_trait::async_trait;
use movie_search_models::{MovieDetails, SearchResult, TypeFilter};
use crate::error::SourceError;

/// Parameters of one listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub page: u32,
    pub type_filter: TypeFilter,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, page: u32, type_filter: TypeFilter) -> Self {
        Self {
            term: term.into(),
            page,
            type_filter,
        }
    }
}

/// Answer to a listing request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Found {
        results: Vec<SearchResult>,
        total_results: u32,
    },
    /// The API reported no match; carries its message
    NotFound { message: String },
}

/// Plot length requested for a details record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotLength {
    Short,
    Full,
}

impl PlotLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotLength::Short => "short",
            PlotLength::Full => "full",
        }
    }
}

/// Remote movie-metadata API
#[async_trait]
pub trait MovieApi: Send + Sync {
    fn source_name(&self) -> &str;

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError>;

    /// Fetch one record; an unknown id is `SourceError::NotFound`
    async fn details(&self, imdb_id: &str, plot: PlotLength) -> Result<MovieDetails, SourceError>;
}

/// Fetched image bytes
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Plain image download, used for poster retrieval
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, SourceError>;
}
