use movie_search_models::TypeFilter;
use std::fmt;
use tracing::debug;

/// Shareable search position: `?q=..&page=..&type=..&movie=..`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlState {
    pub query: Option<String>,
    pub page: u32,
    pub type_filter: TypeFilter,
    /// Details to open once the search has loaded
    pub movie: Option<String>,
}

impl UrlState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            page: 1,
            ..Self::default()
        }
    }

    /// Parse a query string, with or without the leading `?`
    ///
    /// Unknown keys are ignored; bad `page` and `type` values fall back to defaults.
    pub fn parse(input: &str) -> Self {
        let query = input.split_once('?').map_or(input, |(_, q)| q);
        let mut state = UrlState {
            page: 1,
            ..Self::default()
        };

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(raw);
            match key {
                "q" => state.query = Some(value).filter(|v| !v.trim().is_empty()),
                "page" => state.page = value.parse().ok().filter(|p| *p >= 1).unwrap_or(1),
                "type" => state.type_filter = value.parse().unwrap_or_default(),
                "movie" => state.movie = Some(value).filter(|v| !v.trim().is_empty()),
                other => debug!("Ignoring unknown url parameter {}", other),
            }
        }

        state
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(q) = &self.query {
            parts.push(format!("q={}", urlencoding::encode(q)));
        }
        if self.page > 1 {
            parts.push(format!("page={}", self.page));
        }
        if let Some(kind) = self.type_filter.as_query() {
            parts.push(format!("type={}", kind));
        }
        if let Some(movie) = &self.movie {
            parts.push(format!("movie={}", urlencoding::encode(movie)));
        }
        parts.join("&")
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.to_query_string();
        if query.is_empty() {
            Ok(())
        } else {
            write!(f, "?{}", query)
        }
    }
}
