//! Builder configuration, loaded from TOML.
//!
//! ```toml
//! [aggregate]
//! factory_overwrite = "reject"
//! ```

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read builder config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid builder config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// BuilderConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub aggregate: AggregateConfig,
}

impl BuilderConfig {
    /// Parse a config from TOML text. Missing sections fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }
}

///
/// AggregateConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AggregateConfig {
    pub factory_overwrite: FactoryOverwrite,
}

///
/// FactoryOverwrite
///
/// Policy for selecting an aggregation strategy more than once on the same
/// builder.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FactoryOverwrite {
    /// Last selection wins.
    #[default]
    Allow,

    /// A second selection is a structural error.
    Reject,
}
