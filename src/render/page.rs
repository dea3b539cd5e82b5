//! Page layouts: the shared document shell, the table of contents and
//! the article page.

use super::markdown;
use crate::{
    article::Article,
    config::BaseConfig,
    utils::{
        date::{format_full_date, format_iso_date, sort_key},
        slug::article_href,
    },
};
use quick_xml::escape::escape;

/// Site-wide pieces shared by every page.
pub struct Layout<'a> {
    pub base: &'a BaseConfig,
    /// Minified stylesheet, inlined into every `<head>`.
    pub styles: &'a str,
}

impl Layout<'_> {
    /// Wrap `main` in a complete document titled `title`.
    fn document(&self, title: &str, main: &str) -> String {
        let mut html = String::with_capacity(main.len() + self.styles.len() + 512);
        html.push_str("<!doctype html>");
        html.push_str(&format!("<html lang=\"{}\">", escape(self.base.language.as_str())));
        html.push_str("<head>");
        html.push_str("<meta charset=\"utf-8\">");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
        html.push_str(&format!("<title>{}</title>", escape(title)));
        html.push_str(&format!("<style>{}</style>", self.styles));
        html.push_str("</head>");
        html.push_str("<body>");
        html.push_str(&format!(
            "<header><h1>{}</h1></header>",
            escape(self.base.title.as_str())
        ));
        html.push_str(&format!("<main>{main}</main>"));
        html.push_str("</body></html>");
        html
    }

    /// The table of contents, ordered by ascending date.
    pub fn index(&self, articles: &[Article]) -> String {
        let mut sorted: Vec<&Article> = articles.iter().collect();
        sorted.sort_by_key(|article| sort_key(&article.front_matter.date));

        let mut main = self.about_the_author();
        main.push_str("<div id=\"table-of-contents\"><ul>");
        for article in sorted {
            main.push_str(&toc_entry(article));
        }
        main.push_str("</ul></div>");

        self.document(&self.base.title, &main)
    }

    /// A single article page.
    pub fn article(&self, article: &Article) -> String {
        let body = markdown::to_html(&article.body);
        let main = format!("<article>{body}</article>");
        let title = format!("{} | {}", article.front_matter.title, self.base.title);
        self.document(&title, &main)
    }

    /// Empty unless `[base].author` is set.
    fn about_the_author(&self) -> String {
        let Some(author) = &self.base.author else {
            return String::new();
        };

        let mut html = String::from("<div id=\"about-the-author\">");
        if let Some(picture) = &self.base.profile_picture {
            html.push_str(&format!(
                "<div id=\"profile-pic-container\"><img src=\"./assets/{}\" alt=\"{}\" decoding=\"async\"></div>",
                escape(picture.as_str()),
                escape(author.as_str()),
            ));
        }
        html.push_str(&format!(
            "<div>Written by <strong>{}</strong>.",
            escape(author.as_str())
        ));
        if let Some(bio) = &self.base.bio {
            html.push_str(&format!(" {}", escape(bio.as_str())));
        }
        html.push_str("</div></div>");
        html
    }
}

fn toc_entry(article: &Article) -> String {
    let fm = &article.front_matter;
    format!(
        "<li><header><a href=\"{href}\"><h2>{title}</h2></a><div class=\"date\"><time datetime=\"{iso}\">{date}</time></div></header><section>{description}</section></li>",
        href = article_href(&article.slug),
        title = escape(fm.title.as_str()),
        iso = format_iso_date(&fm.date),
        date = format_full_date(&fm.date),
        description = escape(fm.description.as_str()),
    )
}
