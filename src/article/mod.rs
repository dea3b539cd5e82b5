//! Article sources: markdown files with YAML front matter.
//!
//! # Pipeline
//!
//! ```text
//! parse_articles(dir)
//!     │
//!     ├── list entries (non-recursive, dotfiles and directories skipped)
//!     │
//!     └── par_iter ──► Article::from_path()
//!                         ├── slug from file name (`index` is reserved)
//!                         ├── split front matter / body
//!                         └── FrontMatter::parse()  (first violation wins)
//! ```
//!
//! The parse is all-or-nothing: the first failing file aborts it.

mod error;
mod front_matter;

pub use error::ArticleError;
pub use front_matter::FrontMatter;

use crate::{
    log,
    utils::slug::{is_reserved, slug_from_file_name},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A parsed, validated article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub front_matter: FrontMatter,
    /// Markdown source following the front matter, possibly empty.
    pub body: String,
    pub slug: String,
}

impl Article {
    /// Read and parse a single article file.
    ///
    /// The file name is checked before the file is read.
    pub fn from_path(path: &Path) -> Result<Self, ArticleError> {
        let slug = slug_of(path)?;
        let content = fs::read_to_string(path).map_err(|source| ArticleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, slug, &content)
    }

    /// Parse article `content` read from `path`.
    pub fn from_source(path: &Path, content: &str) -> Result<Self, ArticleError> {
        Self::parse(path, slug_of(path)?, content)
    }

    fn parse(path: &Path, slug: &str, content: &str) -> Result<Self, ArticleError> {
        let (block, body) = front_matter::split(content).ok_or_else(|| ArticleError::Malformed {
            path: path.to_path_buf(),
        })?;
        let front_matter = FrontMatter::parse(block, path)?;

        Ok(Self {
            front_matter,
            body: body.to_owned(),
            slug: slug.to_owned(),
        })
    }
}

/// Slug for the article at `path`, rejecting names that are not `<slug>.md`
/// or that would overwrite a generated document.
fn slug_of(path: &Path) -> Result<&str, ArticleError> {
    let slug = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(slug_from_file_name)
        .ok_or_else(|| ArticleError::InvalidFileName {
            path: path.to_path_buf(),
        })?;

    if is_reserved(slug) {
        return Err(ArticleError::ReservedFileName {
            path: path.to_path_buf(),
            slug: slug.to_owned(),
        });
    }
    Ok(slug)
}

/// Parse every article directly inside `dir`, in file-name order.
pub fn parse_articles(dir: &Path) -> Result<Vec<Article>> {
    let sources = collect_sources(dir)?;

    let articles = sources
        .par_iter()
        .map(|path| Article::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    log!("articles"; "parsed {} article(s) from {}", articles.len(), dir.display());
    Ok(articles)
}

/// Article source files in `dir`, sorted by name.
fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read content directory `{}`", dir.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') || entry.file_type()?.is_dir() {
            continue;
        }
        sources.push(entry.path());
    }
    sources.sort();

    Ok(sources)
}
