use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of title as reported by the movie API (`Type` field)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    Game,
    Unknown,
}

impl MediaKind {
    /// Parse the API's `Type` value; anything unrecognised maps to `Unknown`
    pub fn from_api(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "movie" => MediaKind::Movie,
            "series" => MediaKind::Series,
            "episode" => MediaKind::Episode,
            "game" => MediaKind::Game,
            _ => MediaKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Episode => "episode",
            MediaKind::Game => "game",
            MediaKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type filter accepted by listing queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Movie,
    Series,
    Episode,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Movie => "movie",
            TypeFilter::Series => "series",
            TypeFilter::Episode => "episode",
        }
    }

    /// Value for the API's `type` parameter; `All` sends no parameter
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            TypeFilter::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(TypeFilter::All),
            "movie" => Ok(TypeFilter::Movie),
            "series" => Ok(TypeFilter::Series),
            "episode" => Ok(TypeFilter::Episode),
            other => Err(format!("Invalid type filter: {}. Use 'all', 'movie', 'series', or 'episode'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_api() {
        assert_eq!(MediaKind::from_api("movie"), MediaKind::Movie);
        assert_eq!(MediaKind::from_api("Series"), MediaKind::Series);
        assert_eq!(MediaKind::from_api("N/A"), MediaKind::Unknown);
    }

    #[test]
    fn test_type_filter_query_value() {
        assert_eq!(TypeFilter::All.as_query(), None);
        assert_eq!(TypeFilter::Episode.as_query(), Some("episode"));
        assert_eq!("SERIES".parse::<TypeFilter>(), Ok(TypeFilter::Series));
        assert!("documentary".parse::<TypeFilter>().is_err());
    }
}
