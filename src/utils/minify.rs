//! Minification utilities for HTML documents and stylesheets.
//!
//! Both go through the `minify_html` crate; stylesheets are minified as the
//! body of a `<style>` element.

use anyhow::{Result, anyhow};
use std::borrow::Cow;

const STYLE_OPEN: &str = "<style>";
const STYLE_CLOSE: &str = "</style>";

/// Content type for minification.
pub enum MinifyType<'a> {
    /// A complete HTML document
    Html(&'a [u8]),
    /// A CSS stylesheet
    Css(&'a str),
}

/// Minify HTML when `enabled`, otherwise hand the input back untouched.
pub fn minify_html(html: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if enabled {
        Cow::Owned(minify(MinifyType::Html(html)))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify a stylesheet.
///
/// Fails only if the minifier output no longer has the `<style>` wrapper.
pub fn minify_css(css: &str) -> Result<String> {
    if css.trim().is_empty() {
        return Ok(String::new());
    }

    let minified = minify(MinifyType::Css(css));
    let minified = String::from_utf8(minified)?;

    minified
        .trim()
        .strip_prefix(STYLE_OPEN)
        .and_then(|s| s.strip_suffix(STYLE_CLOSE))
        .map(|s| s.trim().to_owned())
        .ok_or_else(|| anyhow!("CSS minifier returned unexpected output"))
}

fn minify(content: MinifyType<'_>) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;

    match content {
        MinifyType::Html(html) => minify_html::minify(html, &cfg),
        MinifyType::Css(css) => {
            let wrapped = format!("{STYLE_OPEN}{css}{STYLE_CLOSE}");
            minify_html::minify(wrapped.as_bytes(), &cfg)
        }
    }
}
