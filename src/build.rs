//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── Site::load()
//!     │       ├── parse_articles()      content/*.md
//!     │       ├── load_styles()         styles.css → minified
//!     │       ├── load_static_assets()  assets/*
//!     │       └── render_site()         index.html + <slug>.html
//!     │
//!     ├── clean / ensure output and output/assets
//!     │
//!     └── Site::write_to() ──► documents and assets written in parallel
//! ```
//!
//! Everything that can fail on bad input happens in `Site::load`, before
//! anything is written.

use crate::{
    article::parse_articles,
    assets::{ASSETS_DIR, StaticAsset, load_static_assets, load_styles},
    config::SiteConfig,
    log,
    render::{RenderedFile, render_site},
    utils::fs::ensure_dir,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A fully rendered site held in memory.
#[derive(Debug)]
pub struct Site {
    pub files: Vec<RenderedFile>,
    pub assets: Vec<StaticAsset>,
}

impl Site {
    /// Parse, render and load everything the site needs.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let articles = parse_articles(&config.build.content)?;
        let styles = load_styles(&config.build.styles)?;
        let assets = load_static_assets(&config.build.assets)?;
        let files = render_site(&articles, &styles, config);

        Ok(Self { files, assets })
    }

    /// Write documents into `dir` and assets into `dir/assets`.
    ///
    /// Both directories must already exist.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let assets_dir = dir.join(ASSETS_DIR);

        let documents = self
            .files
            .par_iter()
            .map(|file| (dir.join(&file.file_name), file.content.as_slice()));
        let assets = self
            .assets
            .par_iter()
            .map(|asset| (assets_dir.join(&asset.file_name), asset.content.as_slice()));

        documents.chain(assets).try_for_each(|(path, content)| {
            fs::write(&path, content).with_context(|| format!("Failed to write `{}`", path.display()))
        })
    }

    /// Paths written by [`Site::write_to`], relative to its target directory.
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|file| PathBuf::from(&file.file_name))
            .chain(
                self.assets
                    .iter()
                    .map(|asset| Path::new(ASSETS_DIR).join(&asset.file_name)),
            )
            .collect()
    }
}

/// Build the site into the configured output directory.
///
/// If `config.build.clean` is true, the output directory is removed first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let site = Site::load(config)?;
    let output = &config.build.output;

    if config.build.clean {
        clean_output(output, config.get_root())?;
    }
    ensure_dir(output)?;
    ensure_dir(&output.join(ASSETS_DIR))?;

    site.write_to(output)?;

    log!(
        "build";
        "wrote {} page(s) and {} asset(s) to {}",
        site.files.len(),
        site.assets.len(),
        output.display()
    );
    Ok(())
}

/// Remove the output directory, refusing to delete the project root.
fn clean_output(output: &Path, root: &Path) -> Result<()> {
    if output == root {
        bail!("Refusing to clean `{}`: output is the project root", output.display());
    }
    if output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean output directory `{}`", output.display()))?;
        log!("build"; "cleaned {}", output.display());
    }
    Ok(())
}
