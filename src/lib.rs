//! Folio - a static site generator for markdown articles.
//!
//! `folio build` renders `content/*.md` into `dist/`; `folio deploy`
//! commits the rendered site to a publish branch and pushes it.

pub mod article;
pub mod assets;
pub mod build;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod init;
pub mod render;
pub mod utils;
