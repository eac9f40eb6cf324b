use movie_search_config::{keys, LocalStore, StoreError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Stored preference, or the default when absent or unreadable
    pub fn load(store: &dyn LocalStore) -> Self {
        match store.get(keys::THEME) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, using default theme", e);
                Theme::default()
            }),
            None => Theme::default(),
        }
    }

    pub fn save(self, store: &dyn LocalStore) -> Result<(), StoreError> {
        store.set(keys::THEME, self.as_str().to_string())
    }

    /// Flip the stored preference and return the new value
    pub fn toggle(store: &dyn LocalStore) -> Result<Self, StoreError> {
        let next = Theme::load(store).toggled();
        next.save(store)?;
        Ok(next)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("Unknown theme '{}'", other)),
        }
    }
}
