pub mod media;
pub mod search_result;
pub mod details;
pub mod history;

pub use media::{MediaKind, TypeFilter};
pub use search_result::{SearchResult, leading_year};
pub use details::MovieDetails;
pub use history::HistoryEntry;

/// Sentinel the movie API uses for absent string fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Treat the "N/A" sentinel (and blank strings) as a missing value
pub fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let trimmed = v.trim();
        !trimmed.is_empty() && trimmed != NOT_AVAILABLE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_filters_sentinel() {
        assert_eq!(available(Some("N/A".to_string())), None);
        assert_eq!(available(Some("  ".to_string())), None);
        assert_eq!(available(None), None);
        assert_eq!(
            available(Some("https://example.com/p.jpg".to_string())),
            Some("https://example.com/p.jpg".to_string())
        );
    }
}
