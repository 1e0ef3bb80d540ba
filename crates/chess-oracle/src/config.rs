//! Engine configuration loaded from TOML.
//!
//! ```toml
//! start_fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1"
//! hash_seed = 42
//! ```

use std::path::Path;

use chess_core::{FenError, FenParser};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid TOML for [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// `start_fen` does not parse.
    #[error("invalid start position: {0}")]
    Fen(#[from] FenError),
}

/// Settings for building [`Tables`](crate::Tables) and an
/// [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Position the engine starts from and resets to.
    /// Defaults to the standard starting position.
    #[serde(default = "default_start_fen")]
    pub start_fen: String,
    /// Seed for the Zobrist keys. Absent means keys come from OS entropy
    /// and hashes differ between runs.
    #[serde(default)]
    pub hash_seed: Option<u64>,
}

fn default_start_fen() -> String {
    FenParser::STARTPOS.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            start_fen: default_start_fen(),
            hash_seed: None,
        }
    }
}

impl EngineConfig {
    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] for invalid TOML and [`ConfigError::Fen`]
    /// for an unparseable `start_fen`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        FenParser::parse(&config.start_fen)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_config() {
        let config = EngineConfig::from_toml_str(
            r#"
start_fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1"
hash_seed = 42
"#,
        )
        .unwrap();
        assert_eq!(config.start_fen, "4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(config.hash_seed, Some(42));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.start_fen, FenParser::STARTPOS);
        assert_eq!(config.hash_seed, None);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = EngineConfig::from_toml_str("hash_seed = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = EngineConfig::from_toml_str("hash_seed = \"seven\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_start_fen_is_rejected() {
        let err = EngineConfig::from_toml_str("start_fen = \"8/8 w\"").unwrap_err();
        assert!(matches!(err, ConfigError::Fen(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hash_seed = 1234").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.hash_seed, Some(1234));
        assert_eq!(config.start_fen, FenParser::STARTPOS);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = EngineConfig::load("/nonexistent/oracle.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn serializes_back_to_toml() {
        let config = EngineConfig {
            start_fen: "8/8/8/8/8/8/8/K6k b - - 0 1".to_string(),
            hash_seed: Some(7),
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
