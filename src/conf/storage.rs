use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite file backing the measurement table. `:memory:` is accepted
    /// and keeps the store entirely in memory.
    #[serde(default = "StorageConfig::default_db_path")]
    pub db_path: PathBuf,
}

impl StorageConfig {
    fn default_db_path() -> PathBuf {
        PathBuf::from("trace.db")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: Self::default_db_path(),
        }
    }
}
