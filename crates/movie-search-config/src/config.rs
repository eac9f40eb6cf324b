use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides `api.api_key`
pub const API_KEY_ENV: &str = "MARQUEE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a suggestion request is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    /// Bound on cached responses (least recently used evicted first). Unbounded when unset.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Where details sheets are written; defaults to the data directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Prefix prepended to a poster URL for the second fetch attempt
    #[serde(default = "default_poster_proxy")]
    pub poster_proxy: Option<String>,
}

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_history_limit() -> usize {
    20
}

fn default_poster_proxy() -> Option<String> {
    Some("https://images.weserv.nl/?url=".to_string())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            suggestion_limit: default_suggestion_limit(),
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// API key from the environment, then from the file
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| Some(self.api.api_key.clone()))
            .filter(|k| !k.trim().is_empty() && k != "YOUR_API_KEY")
    }

    pub fn is_api_configured(&self) -> bool {
        self.effective_api_key().is_some()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_api_configured() {
            return Err(anyhow::anyhow!(
                "api_key is not configured (run `marquee config set-key` or set {})",
                API_KEY_ENV
            ));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("base_url must be an http(s) URL: {}", self.api.base_url));
        }
        if self.api.timeout_secs == 0 {
            return Err(anyhow::anyhow!("timeout_secs must be greater than zero"));
        }
        if self.search.suggestion_limit == 0 {
            return Err(anyhow::anyhow!("suggestion_limit must be greater than zero"));
        }
        if self.search.history_limit == 0 {
            return Err(anyhow::anyhow!("history_limit must be greater than zero"));
        }
        if self.cache.max_entries == Some(0) {
            return Err(anyhow::anyhow!("cache.max_entries must be greater than zero when set"));
        }
        Ok(())
    }
}
