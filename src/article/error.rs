//! Article parsing errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an article source was rejected. Every variant names the file.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Article is malformed: `{path}` (expected `---` delimited front matter)")]
    Malformed { path: PathBuf },

    #[error("Invalid YAML front matter in `{path}`")]
    FrontMatterSyntax {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid front matter in `{path}`: `{field}` {reason}")]
    Schema {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid article file name `{path}` (expected lowercase `[a-z0-9-]+.md`)")]
    InvalidFileName { path: PathBuf },

    #[error("Article `{path}` would overwrite the generated `{slug}.html`; rename it")]
    ReservedFileName { path: PathBuf, slug: String },

    #[error("Failed to read article `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArticleError {
    /// The source file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Malformed { path }
            | Self::FrontMatterSyntax { path, .. }
            | Self::Schema { path, .. }
            | Self::InvalidFileName { path }
            | Self::ReservedFileName { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}
