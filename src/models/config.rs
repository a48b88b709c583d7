//! Run configuration for the layout driver.

use crate::codec::Dimensionality;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a checkpointed layout run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Total number of steps to run; step numbers stay strictly below this.
    #[serde(default = "default_iterations")]
    pub iterations: u64,

    /// Steps between intermediate snapshots.
    #[serde(default = "default_save_interval")]
    pub save_interval: u64,

    /// Checkpoint directory.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Store two coordinates per record instead of three.
    ///
    /// Must match whatever produced any checkpoints already in `out_dir`;
    /// the snapshot format does not record its own dimensionality.
    #[serde(default)]
    pub two_dimensional: bool,
}

fn default_iterations() -> u64 {
    500
}

fn default_save_interval() -> u64 {
    5
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            save_interval: default_save_interval(),
            out_dir: default_out_dir(),
            two_dimensional: false,
        }
    }
}

impl LayoutConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check value constraints not expressible in the type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_interval == 0 {
            return Err(ConfigError::InvalidSaveInterval);
        }
        Ok(())
    }

    /// Record shape implied by `two_dimensional`.
    pub fn dimensionality(&self) -> Dimensionality {
        if self.two_dimensional {
            Dimensionality::Two
        } else {
            Dimensionality::Three
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("save_interval must be at least 1")]
    InvalidSaveInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LayoutConfig::default();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.save_interval, 5);
        assert_eq!(config.out_dir, PathBuf::from("./data"));
        assert!(!config.two_dimensional);
        assert_eq!(config.dimensionality(), Dimensionality::Three);
    }

    #[test]
    fn zero_save_interval_rejected() {
        let config = LayoutConfig {
            save_interval: 0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSaveInterval)
        ));
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: LayoutConfig = toml::from_str("two_dimensional = true\n").unwrap();
        assert!(config.two_dimensional);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.dimensionality(), Dimensionality::Two);
    }
}
