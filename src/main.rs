//! Folio - A static site generator for markdown blogs.

use anyhow::Result;
use clap::Parser;
use folio::{
    build::build_site,
    cli::{Cli, Commands},
    config::SiteConfig,
    deploy::deploy_site,
    init::new_site,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { .. } => new_site(&config),
        Commands::Build { .. } => build_site(&config),
        Commands::Deploy { .. } => deploy_site(&config),
    }
}
