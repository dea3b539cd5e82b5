//! Site rendering: parsed articles in, in-memory HTML documents out.
//!
//! Nothing here touches the filesystem. The build writes the documents to
//! the output directory; the deploy writes them into the publish branch.

mod markdown;
mod page;

use crate::{
    article::Article,
    config::SiteConfig,
    render::page::Layout,
    utils::{minify::minify_html, slug::html_file_name},
};
use rayon::prelude::*;

/// Name of the table of contents document.
pub const INDEX_FILE: &str = "index.html";

/// A rendered document, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl RenderedFile {
    fn new(file_name: String, html: String, minify: bool) -> Self {
        let content = minify_html(html.as_bytes(), minify).into_owned();
        Self { file_name, content }
    }
}

/// Render `index.html` followed by one page per article, in input order.
pub fn render_site(articles: &[Article], styles: &str, config: &SiteConfig) -> Vec<RenderedFile> {
    let layout = Layout {
        base: &config.base,
        styles,
    };
    let minify = config.build.minify;

    let mut files = Vec::with_capacity(articles.len() + 1);
    files.push(RenderedFile::new(
        INDEX_FILE.to_owned(),
        layout.index(articles),
        minify,
    ));
    files.par_extend(articles.par_iter().map(|article| {
        RenderedFile::new(html_file_name(&article.slug), layout.article(article), minify)
    }));

    files
}
