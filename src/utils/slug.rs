//! Slugs derived from article file names.
//!
//! An article stored as `content/hello-world.md` gets the slug
//! `hello-world` and is rendered to `hello-world.html`.

use regex::Regex;
use std::sync::OnceLock;

/// Extension article sources must carry.
pub const ARTICLE_EXTENSION: &str = ".md";

fn file_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\A([a-z0-9-]+)\.md\z").expect("valid slug regex"))
}

/// Slug for an article file name, or `None` if the name is not `<slug>.md`
/// with a slug of lowercase ASCII letters, digits and hyphens.
pub fn slug_from_file_name(file_name: &str) -> Option<&str> {
    file_name_pattern()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Slugs whose page would collide with a generated document.
pub const RESERVED_SLUGS: &[&str] = &["index"];

/// Whether `slug` names a generated document such as the table of contents.
pub fn is_reserved(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}

/// Output file name for a slug.
pub fn html_file_name(slug: &str) -> String {
    format!("{slug}.html")
}

/// Relative link to an article page, as used in the table of contents.
pub fn article_href(slug: &str) -> String {
    format!("./{}", html_file_name(slug))
}
