//! Signal extraction over a parsed document.
//!
//! Everything here is pure computation; network-dependent signals (link
//! health, duplicates) are filled in by the orchestrator afterwards.

pub mod images;
pub mod keywords;
pub mod readability;
pub mod sentiment;
pub mod text;

use crate::document::{Headings, ParsedDocument};
use crate::links::{Link, LinkStats, ProbedLink};
use images::ImageAudit;
use keywords::KeywordDensity;
use sentiment::Sentiment;

pub const TITLE_MIN: usize = 30;
pub const TITLE_MAX: usize = 60;
pub const META_MIN: usize = 70;
pub const META_MAX: usize = 160;
pub const THIN_CONTENT_WORDS: usize = 300;

/// Length caps with 20% slack; within slack earns a partial sub-score.
const TITLE_PARTIAL_MAX: usize = TITLE_MAX + TITLE_MAX / 5;
const META_PARTIAL_MAX: usize = META_MAX + META_MAX / 5;

const TOP_KEYWORDS: usize = 20;
const DENSITY_TOP_N: usize = 3;

/// All signals for one analysis run. Owned by the orchestrator; the
/// persisted report is assembled from a finished instance.
#[derive(Debug, Clone)]
pub struct PageMetrics {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub headings: Headings,
    pub word_count: usize,
    pub thin_content: bool,
    pub readability_score: u8,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub keyword_density: Vec<KeywordDensity>,
    pub primary_keyword: Option<String>,
    pub primary_keyword_in_title: bool,
    pub primary_keyword_in_meta: bool,
    pub title_length_ok: bool,
    pub title_length_partial: bool,
    pub meta_length_ok: bool,
    pub meta_length_partial: bool,
    pub h1_count: usize,
    pub h2_count: usize,
    pub images: ImageAudit,
    pub link_stats: LinkStats,
    pub links: Vec<Link>,
    pub broken_links: Vec<ProbedLink>,
    pub broken_count: usize,
    pub duplicate_title: bool,
    pub duplicate_meta: bool,
}

impl PageMetrics {
    /// Derive all content signals from a parsed document. Link and
    /// duplicate fields start empty/false.
    pub fn derive(doc: &ParsedDocument) -> Self {
        let body = &doc.body_text;
        let word_count = text::count_words(body);
        let primary_keyword = keywords::primary_keyword(body);

        let primary_keyword_in_title = contains_keyword(&primary_keyword, doc.title.as_deref());
        let primary_keyword_in_meta =
            contains_keyword(&primary_keyword, doc.meta_description.as_deref());

        let title_len = doc.title.as_deref().map_or(0, |t| t.chars().count());
        let meta_len = doc
            .meta_description
            .as_deref()
            .map_or(0, |m| m.chars().count());

        Self {
            title: doc.title.clone(),
            meta_description: doc.meta_description.clone(),
            headings: doc.headings.clone(),
            word_count,
            thin_content: word_count < THIN_CONTENT_WORDS,
            readability_score: readability::readability_score(body),
            sentiment: sentiment::analyze_sentiment(body),
            keywords: keywords::top_keywords(body, TOP_KEYWORDS),
            keyword_density: keywords::keyword_density(body, DENSITY_TOP_N),
            primary_keyword,
            primary_keyword_in_title,
            primary_keyword_in_meta,
            title_length_ok: (TITLE_MIN..=TITLE_MAX).contains(&title_len),
            title_length_partial: title_len > 0 && title_len < TITLE_PARTIAL_MAX,
            meta_length_ok: (META_MIN..=META_MAX).contains(&meta_len),
            meta_length_partial: meta_len > 0 && meta_len < META_PARTIAL_MAX,
            h1_count: doc.headings.h1.len(),
            h2_count: doc.headings.h2.len(),
            images: images::audit_images(&doc.images),
            link_stats: LinkStats::default(),
            links: Vec::new(),
            broken_links: Vec::new(),
            broken_count: 0,
            duplicate_title: false,
            duplicate_meta: false,
        }
    }

    /// Attach extracted links and recompute the internal/external tallies.
    pub fn set_links(&mut self, links: Vec<Link>) {
        self.link_stats = LinkStats::from_links(&links);
        self.links = links;
    }
}

fn contains_keyword(keyword: &Option<String>, haystack: Option<&str>) -> bool {
    match (keyword, haystack) {
        (Some(kw), Some(text)) => text.to_lowercase().contains(&kw.to_lowercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParsedDocument;

    #[test]
    fn derives_content_signals() {
        let html = r#"<html><head>
            <title>Coffee brewing guide for patient people everywhere</title>
            <meta name="description" content="Coffee brewing explained step by step.">
        </head><body>
            <h1>Coffee</h1><h2>Grind</h2>
            <p>Coffee coffee coffee brewing brewing guide.</p>
        </body></html>"#;

        let metrics = PageMetrics::derive(&ParsedDocument::parse(html));
        assert_eq!(metrics.primary_keyword.as_deref(), Some("coffee"));
        assert!(metrics.primary_keyword_in_title);
        assert!(metrics.primary_keyword_in_meta);
        assert_eq!(metrics.h1_count, 1);
        assert_eq!(metrics.h2_count, 1);
        assert!(metrics.thin_content);
        assert!(metrics.title_length_ok);
    }

    #[test]
    fn meta_boundaries_are_inclusive() {
        let meta = "m".repeat(70);
        let html = format!(
            r#"<head><meta name="description" content="{}"></head><body>x</body>"#,
            meta
        );
        let metrics = PageMetrics::derive(&ParsedDocument::parse(&html));
        assert!(metrics.meta_length_ok);
    }

    #[test]
    fn short_title_is_partial_not_ok() {
        let html = "<head><title>Tiny</title></head><body>words here</body>";
        let metrics = PageMetrics::derive(&ParsedDocument::parse(html));
        assert!(!metrics.title_length_ok);
        assert!(metrics.title_length_partial);
    }

    #[test]
    fn overlong_title_past_slack_is_not_partial() {
        let title = "t".repeat(80);
        let html = format!("<head><title>{}</title></head><body>x</body>", title);
        let metrics = PageMetrics::derive(&ParsedDocument::parse(&html));
        assert!(!metrics.title_length_ok);
        assert!(!metrics.title_length_partial);
    }

    #[test]
    fn missing_fields_stay_absent() {
        let metrics = PageMetrics::derive(&ParsedDocument::parse("<body></body>"));
        assert_eq!(metrics.title, None);
        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.readability_score, 0);
        assert!(!metrics.title_length_partial);
        assert!(!metrics.meta_length_partial);
    }
}
