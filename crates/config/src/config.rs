//! Configuration files.

use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// The default file name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "assay.toml";

/// Configuration for assay.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Configuration for block validation.
    pub validation: ValidationConfig,
}

impl Config {
    /// Loads the configuration from the given path, creating the file with the defaults if it
    /// does not exist.
    pub fn from_path(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        confy::load_path::<Self>(path)
            .wrap_err_with(|| format!("Could not load config file {}", path.display()))
    }

    /// Writes the configuration to the given path.
    pub fn save(&self, path: impl AsRef<Path>) -> eyre::Result<()> {
        let path = path.as_ref();
        confy::store_path(path, self)
            .wrap_err_with(|| format!("Could not save config file {}", path.display()))
    }
}

/// Block validation configuration.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Whether the world state produced by a valid block is persisted as the node's head.
    pub persist_state: bool,
    /// Whether blocks rejected for protocol reasons are recorded in the bad-block registry.
    pub record_bad_blocks: bool,
    /// Overrides the maximum encoded block size of forks that bound it.
    pub max_rlp_block_size: Option<usize>,
    /// Validations taking longer than this are logged as slow.
    #[serde(with = "humantime_serde")]
    pub slow_block_threshold: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            persist_state: true,
            record_bad_blocks: true,
            max_rlp_block_size: None,
            slow_block_threshold: Duration::from_secs(1),
        }
    }
}
