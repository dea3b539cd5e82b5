//! Front matter extraction and validation.
//!
//! An article source looks like:
//!
//! ```text
//! ---
//! title: Hello
//! description: A first post
//! date: 2024-01-01
//! ---
//! # Markdown body
//! ```
//!
//! The YAML block is checked field by field and the first violation wins.

use super::ArticleError;
use crate::utils::date::parse_iso8601;
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::{path::Path, sync::OnceLock};

/// Validated article metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub date: DateTime<FixedOffset>,
}

fn delimiter_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A\s*---[ \t]*\r?\n(.+?)\r?\n[ \t]*---[ \t]*(?:\r?\n(.*))?\z")
            .expect("valid front matter regex")
    })
}

/// Split a source into its raw front matter block and its body.
///
/// The body may be empty. Returns `None` when the delimiters are missing.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let caps = delimiter_pattern().captures(content)?;
    let block = caps.get(1)?.as_str();
    let body = caps.get(2).map_or("", |m| m.as_str());
    Some((block, body))
}

impl FrontMatter {
    /// Parse and validate a raw YAML block. `path` is only used for errors.
    pub fn parse(block: &str, path: &Path) -> Result<Self, ArticleError> {
        let value: Value =
            serde_yaml::from_str(block).map_err(|source| ArticleError::FrontMatterSyntax {
                path: path.to_path_buf(),
                source,
            })?;

        let schema = |field, reason: String| ArticleError::Schema {
            path: path.to_path_buf(),
            field,
            reason,
        };

        let map = match value {
            Value::Mapping(map) => map,
            other => {
                return Err(schema(
                    "front matter",
                    format!("must be a mapping, found {}", kind(&other)),
                ));
            }
        };

        let title = require_str(&map, "title").map_err(|reason| schema("title", reason))?;
        let description =
            require_str(&map, "description").map_err(|reason| schema("description", reason))?;
        let raw_date = require_str(&map, "date").map_err(|reason| schema("date", reason))?;
        let date = parse_iso8601(&raw_date).ok_or_else(|| {
            schema(
                "date",
                format!("must be an ISO-8601 date or date-time, found `{raw_date}`"),
            )
        })?;

        Ok(Self {
            title,
            description,
            date,
        })
    }
}

fn require_str(map: &Mapping, field: &str) -> Result<String, String> {
    match map.get(field) {
        None => Err("is required".into()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("must be a string, found {}", kind(other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
