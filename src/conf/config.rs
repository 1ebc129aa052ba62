use crate::{
    conf::{ServerConfig, SourceConfig, StorageConfig},
    core::TraceError::{self, ConfigParsingError},
};
use config::Config as CConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, TraceError> {
        let config = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("TRACEBENCH").separator("__"))
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        return Ok(config);
    }

    /// Loads from a TOML file when a path is given, otherwise from defaults.
    /// Environment variables (`TRACEBENCH_SECTION__FIELD`) override either way.
    pub fn load(path: Option<&str>) -> Result<Config, TraceError> {
        match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| ConfigParsingError(format!("reading {p}: {e}")))?;
                Self::from_str(&raw)
            }
            None => Self::from_str(""),
        }
    }
}
