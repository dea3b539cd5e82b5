//! Site initialization module.
//!
//! Creates a new site with a sample article, a starter stylesheet and a
//! default configuration.

use crate::{
    config::SiteConfig,
    log,
    utils::{date::format_iso_date, slug::ARTICLE_EXTENSION},
};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Slug of the sample article
const SAMPLE_SLUG: &str = "hello-world";

const SAMPLE_BODY: &str = "\
# Hello

This is your first article. Edit or delete `content/hello-world.md`, then run
`folio build` and open `dist/index.html`.
";

const STARTER_STYLES: &str = "\
body {
    max-width: 42rem;
    margin: 0 auto;
    padding: 1rem;
    font-family: system-ui, sans-serif;
    line-height: 1.6;
}

#table-of-contents ul {
    list-style: none;
    padding: 0;
}

.date {
    color: #666;
    font-size: 0.9rem;
}

#profile-pic-container img {
    width: 4rem;
    border-radius: 50%;
}
";

/// Create a new site at the configured root
pub fn new_site(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();

    if !is_dir_empty(root)? {
        bail!(
            "Directory `{}` is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory.",
            root.display()
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_site_structure(config)?;
    init_default_config(config)?;
    init_ignored_files(root, &[relative_to_root(&config.build.output, root).as_path()])?;

    log!("init"; "created new site in {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// `path` relative to `root` when it lives under it
fn relative_to_root(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Write the configuration file, with paths relative to the root
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut written = config.clone();
    for path in [
        &mut written.build.content,
        &mut written.build.assets,
        &mut written.build.styles,
        &mut written.build.output,
    ] {
        *path = relative_to_root(path, root);
    }

    let content = toml::to_string_pretty(&written)?;
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))?;
    Ok(())
}

/// Create content and assets directories, the stylesheet and a sample article
fn init_site_structure(config: &SiteConfig) -> Result<()> {
    for dir in [&config.build.content, &config.build.assets] {
        if dir.exists() {
            bail!(
                "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
                dir.display()
            );
        }
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    fs::write(&config.build.styles, STARTER_STYLES)
        .with_context(|| format!("Failed to write {}", config.build.styles.display()))?;

    let sample = config
        .build
        .content
        .join(format!("{SAMPLE_SLUG}{ARTICLE_EXTENSION}"));
    fs::write(&sample, sample_article())
        .with_context(|| format!("Failed to write {}", sample.display()))?;

    Ok(())
}

fn sample_article() -> String {
    let today = format_iso_date(&Utc::now().fixed_offset());
    format!(
        "---\ntitle: Hello, world\ndescription: A first article.\ndate: {today}\n---\n{SAMPLE_BODY}"
    )
}

/// Initialize ignore files with the specified paths
pub fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{}\n", p.trim_start_matches('/')))
        .collect::<String>();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
