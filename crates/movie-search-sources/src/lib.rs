pub mod traits;
pub mod omdb;
pub mod error;

pub use traits::{FetchedImage, ImageFetcher, MovieApi, PlotLength, SearchQuery, SearchResponse};
pub use omdb::{HttpImageFetcher, OmdbClient};
pub use error::SourceError;
