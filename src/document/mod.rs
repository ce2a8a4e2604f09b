//! One-shot HTML parsing into owned, plain data.
//!
//! `scraper::Html` is not `Send`, so nothing parser-owned may cross an
//! await point in the async pipeline. [`ParsedDocument`] is built once per
//! analysis run and carries only owned strings; the parse tree is dropped
//! before any network work starts.

use crate::metrics::text::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

// Anything that contains an opening tag is treated as HTML.
static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<[a-z].*>").unwrap());

/// Ordered heading texts per level, trimmed, empties dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

/// An `<img>` element with a non-empty `src`.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub src: String,
    pub alt: Option<String>,
}

/// A fully-owned snapshot of one parsed page. Ephemeral: derived metrics
/// outlive it, the document itself is never persisted.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub headings: Headings,
    /// Visible body text, whitespace collapsed and trimmed.
    pub body_text: String,
    /// Raw `href` values of every anchor, in document order.
    pub anchors: Vec<String>,
    pub images: Vec<RawImage>,
}

impl ParsedDocument {
    /// Parse an HTML document. Malformed markup never fails: missing
    /// elements simply yield `None` / empty collections.
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);

        let title = doc
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let meta_description = doc
            .select(&META_DESCRIPTION)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let headings = Headings {
            h1: heading_texts(&doc, &H1),
            h2: heading_texts(&doc, &H2),
            h3: heading_texts(&doc, &H3),
        };

        let body_text = doc
            .select(&BODY)
            .next()
            .map(|body| collapse_whitespace(&body.text().collect::<String>()))
            .unwrap_or_default();

        let anchors = doc
            .select(&ANCHOR)
            .filter_map(|el| el.value().attr("href"))
            .map(|href| href.to_string())
            .collect();

        let images = doc
            .select(&IMG)
            .filter_map(|el| {
                let src = el.value().attr("src")?;
                if src.is_empty() {
                    return None;
                }
                Some(RawImage {
                    src: src.to_string(),
                    alt: el.value().attr("alt").map(|a| a.to_string()),
                })
            })
            .collect();

        Self {
            title,
            meta_description,
            headings,
            body_text,
            anchors,
            images,
        }
    }

    /// Parse pasted content. Plain text that merely mentions `<` must not
    /// be mis-parsed as markup, so anything failing the tag heuristic is
    /// escaped and wrapped in a body first.
    pub fn from_pasted(content: &str) -> Self {
        if HTML_TAG_REGEX.is_match(content) {
            Self::parse(content)
        } else {
            let escaped = content.replace('<', "&lt;");
            Self::parse(&format!("<body>{}</body>", escaped))
        }
    }
}

fn heading_texts(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_meta_and_headings() {
        let html = r#"<html><head>
            <title> My Page </title>
            <meta name="description" content=" A description ">
        </head><body>
            <h1>First</h1><h2>Sub</h2><h2></h2><h3>Deep</h3>
            <p>Hello world</p>
        </body></html>"#;

        let doc = ParsedDocument::parse(html);
        assert_eq!(doc.title.as_deref(), Some("My Page"));
        assert_eq!(doc.meta_description.as_deref(), Some("A description"));
        assert_eq!(doc.headings.h1, vec!["First"]);
        assert_eq!(doc.headings.h2, vec!["Sub"]);
        assert_eq!(doc.headings.h3, vec!["Deep"]);
        assert!(doc.body_text.contains("Hello world"));
    }

    #[test]
    fn missing_elements_yield_absent_fields() {
        let doc = ParsedDocument::parse("<html><body><p>text</p></body></html>");
        assert_eq!(doc.title, None);
        assert_eq!(doc.meta_description, None);
        assert!(doc.headings.h1.is_empty());
        assert!(doc.anchors.is_empty());
        assert!(doc.images.is_empty());
    }

    #[test]
    fn collects_anchors_and_images_in_order() {
        let html = r##"<body>
            <a href="/one">1</a>
            <img src="a.png" alt="a">
            <a href="#frag">2</a>
            <img src="" alt="empty src skipped">
            <img src="b.png">
        </body>"##;

        let doc = ParsedDocument::parse(html);
        assert_eq!(doc.anchors, vec!["/one", "#frag"]);
        assert_eq!(doc.images.len(), 2);
        assert_eq!(doc.images[0].src, "a.png");
        assert_eq!(doc.images[0].alt.as_deref(), Some("a"));
        assert_eq!(doc.images[1].alt, None);
    }

    #[test]
    fn pasted_plain_text_is_not_parsed_as_markup() {
        let doc = ParsedDocument::from_pasted("a < b and also a > b, ten words of plain text");
        assert_eq!(doc.title, None);
        assert!(doc.body_text.contains("a < b"));
    }

    #[test]
    fn pasted_html_is_parsed_as_markup() {
        let doc = ParsedDocument::from_pasted("<h1>Hi</h1><p>body</p>");
        assert_eq!(doc.headings.h1, vec!["Hi"]);
    }
}
