use crate::browse::Pagination;
use crate::error::LoadError;
use movie_search_models::{SearchResult, TypeFilter};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The API found nothing; not a failure
    Empty { message: String },
    Failed(LoadError),
}

/// What the front end renders for the current listing
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchView {
    pub term: String,
    pub page: u32,
    pub type_filter: TypeFilter,
    pub results: Vec<SearchResult>,
    pub total_results: u32,
    pub status: ViewStatus,
}

impl SearchView {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.total_results)
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }
}
