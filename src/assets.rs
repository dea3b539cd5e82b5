//! Static assets and the site stylesheet.

use crate::{log, utils::minify::minify_css};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Name of the assets directory inside the output.
pub const ASSETS_DIR: &str = "assets";

/// A file copied verbatim into the output's `assets/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Read every file directly inside `dir`.
///
/// A missing directory means no assets. Subdirectories and dotfiles are
/// skipped.
pub fn load_static_assets(dir: &Path) -> Result<Vec<StaticAsset>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read assets directory `{}`", dir.display()))?
    {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') || entry.file_type()?.is_dir() {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();

    let assets = paths
        .par_iter()
        .map(|path| {
            let content = fs::read(path)
                .with_context(|| format!("Failed to read asset `{}`", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(StaticAsset { file_name, content })
        })
        .collect::<Result<Vec<_>>>()?;

    log!("assets"; "loaded {} static asset(s)", assets.len());
    Ok(assets)
}

/// Read and minify the stylesheet at `path`.
pub fn load_styles(path: &Path) -> Result<String> {
    let css = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stylesheet `{}`", path.display()))?;
    minify_css(&css).with_context(|| format!("Failed to minify `{}`", path.display()))
}
