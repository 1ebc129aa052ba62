use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the measurement CSV files live and how eagerly they are reloaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default = "SourceConfig::default_csv_dir")]
    pub csv_dir: PathBuf,
    #[serde(default)]
    pub reload: ReloadMode,
}

impl SourceConfig {
    fn default_csv_dir() -> PathBuf {
        PathBuf::from(".")
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_dir: Self::default_csv_dir(),
            reload: ReloadMode::default(),
        }
    }
}

/// `Always` reparses every CSV on every request. `OnChange` skips the
/// reload when no listed file's size or mtime moved since the last clean
/// ingest cycle; query results are identical either way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadMode {
    #[default]
    Always,
    OnChange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_default() {
        let source = SourceConfig::default();
        assert_eq!(source.csv_dir, PathBuf::from("."));
        assert_eq!(source.reload, ReloadMode::Always);
    }

    #[test]
    fn test_reload_mode_names() {
        let mode: ReloadMode = serde_json::from_str(r#""on-change""#).unwrap();
        assert_eq!(mode, ReloadMode::OnChange);
        let mode: ReloadMode = serde_json::from_str(r#""always""#).unwrap();
        assert_eq!(mode, ReloadMode::Always);
    }
}
