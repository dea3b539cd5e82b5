//! Utility modules for the static site generator.

pub mod date;
pub mod exec;
pub mod fs;
pub mod git;
pub mod log;
pub mod minify;
pub mod slug;
