//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[base]`    | Site title, language, author block             |
//! | `[build]`   | Source/output paths, HTML minification         |
//! | `[deploy]`  | Publish branch, remote and commit message      |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Technology Review"
//! author = "Alice"
//!
//! [build]
//! content = "content"
//! output = "dist"
//!
//! [deploy]
//! branch = "dist"
//! ```
//!
//! A missing config file means every default applies.

mod base;
mod build;
pub mod defaults;
mod deploy;
mod error;

pub use base::BaseConfig;
pub use build::BuildConfig;
pub use deploy::DeployConfig;
pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Deployment settings
    #[serde(default)]
    pub deploy: DeployConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new(defaults::CONFIG_FILE))
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::parse(&content, path)
    }

    /// Parse `content`, naming `path` in errors
    fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Load the config selected by the CLI and apply its overrides.
    ///
    /// The config file is optional except that `init` refuses to overwrite one.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = Self::cli_root(cli);
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);

        if cli.is_init() && config.config_path.exists() {
            bail!("Config file already exists. Remove it manually or init in a different path.");
        }
        config.validate(cli)?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Root from `--root` (tilde-expanded), joined with the `init` site name.
    fn cli_root(cli: &Cli) -> PathBuf {
        let root = cli
            .root
            .as_ref()
            .map(|root| PathBuf::from(shellexpand::tilde(&root.to_string_lossy()).into_owned()))
            .unwrap_or_else(|| PathBuf::from("./"));

        match &cli.command {
            Commands::Init { name: Some(name) } => root.join(name),
            _ => root,
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => {
                Self::update_option(&mut self.build.minify, build_args.minify.as_ref());
                self.build.clean |= build_args.clean;
            }
            Commands::Deploy {
                build_args,
                message,
                force,
            } => {
                Self::update_option(&mut self.build.minify, build_args.minify.as_ref());
                Self::update_option(&mut self.deploy.message, message.as_ref());
                Self::update_option(&mut self.deploy.force, force.as_ref());
            }
            Commands::Init { .. } => {}
        }

        let root = Self::cli_root(cli);
        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize them
    fn update_path_with_root(&mut self, root: &Path, config_file: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_file));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.styles = Self::normalize_path(&root.join(&self.build.styles));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        if let Commands::Deploy { .. } = cli.command {
            Self::check_command_installed("git")?;

            for (field, value) in [
                ("[deploy.remote]", &self.deploy.remote),
                ("[deploy.branch]", &self.deploy.branch),
                ("[deploy.message]", &self.deploy.message),
            ] {
                if value.trim().is_empty() {
                    bail!(ConfigError::Validation(format!("{field} must not be empty")));
                }
            }
        }

        if let Some(picture) = &self.base.profile_picture
            && Path::new(picture).components().count() != 1
        {
            bail!(ConfigError::Validation(
                "[base.profile_picture] must be a file name inside the assets directory".into()
            ));
        }

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(cmd: &str) -> Result<()> {
        which::which(cmd).with_context(|| format!("`{cmd}` not found. Please install it first."))?;
        Ok(())
    }
}
