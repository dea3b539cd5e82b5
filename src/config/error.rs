//! Errors raised while loading `folio.toml`.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors. Each names the config file it concerns,
/// or the offending key for validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid TOML in config file `{path}`")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid site configuration: {0}")]
    Validation(String),
}
