pub mod config;
pub mod paths;
pub mod store;

pub use config::{ApiConfig, CacheConfig, Config, ExportConfig, SearchConfig, API_KEY_ENV};
pub use paths::{PathManager, base_path_override};
pub use store::{FileStore, LocalStore, MemoryStore, StoreError, keys};
