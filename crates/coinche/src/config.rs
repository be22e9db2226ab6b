//! Runner configuration (`coinche.toml`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::StoreError;

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "coinche.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the club state is persisted
    pub data_file: PathBuf,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Fixed seed for table draws (None = fresh randomness each round)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("coinche.json"),
            log_filter: "info".to_string(),
            seed: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| StoreError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("seed = 42").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.data_file, PathBuf::from("coinche.json"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            data_file = "/var/lib/coinche/club.json"
            log_filter = "coinche=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/coinche/club.json"));
        assert_eq!(config.log_filter, "coinche=debug");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_bad_config() {
        assert!(Config::parse("seed = \"abc\"").is_err());
    }

    #[test]
    fn test_missing_file_defaults() {
        let config = Config::load(Path::new("/nonexistent/coinche.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
