//! Weighted scoring over the derived metrics.
//!
//! Twelve fixed-weight categories; the weights sum to 80, so a fully
//! passing page scores 80. Each category earns 100 when its "ok"
//! condition holds, 50 when only the weaker partial condition holds
//! (title/meta length only), else 0.

use crate::metrics::{META_MAX, META_MIN, PageMetrics, TITLE_MAX, TITLE_MIN};
use serde::{Deserialize, Serialize};

/// Per-category sub-scores (each 0, 50 or 100).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub title: u8,
    pub title_length: u8,
    pub meta: u8,
    pub meta_length: u8,
    pub h1: u8,
    pub headings: u8,
    pub word_count: u8,
    pub readability: u8,
    pub images_alt: u8,
    pub links: u8,
    pub keyword_in_title: u8,
    pub keyword_in_meta: u8,
}

impl ScoreBreakdown {
    fn set(&mut self, key: &str, value: u8) {
        match key {
            "title" => self.title = value,
            "titleLength" => self.title_length = value,
            "meta" => self.meta = value,
            "metaLength" => self.meta_length = value,
            "h1" => self.h1 = value,
            "headings" => self.headings = value,
            "wordCount" => self.word_count = value,
            "readability" => self.readability = value,
            "imagesAlt" => self.images_alt = value,
            "links" => self.links = value,
            "keywordInTitle" => self.keyword_in_title = value,
            "keywordInMeta" => self.keyword_in_meta = value,
            _ => {}
        }
    }
}

/// A human-readable improvement hint, keyed by scoring category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub key: &'static str,
    pub text: String,
}

impl Suggestion {
    fn new(key: &'static str, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub suggestions: Vec<String>,
}

/// Rule pass producing at most one suggestion per category.
pub fn build_suggestions(m: &PageMetrics) -> Vec<Suggestion> {
    let mut out = Vec::new();

    match &m.title {
        None => out.push(Suggestion::new("title", "Add a page title")),
        Some(title) => {
            let len = title.chars().count();
            if len < TITLE_MIN {
                out.push(Suggestion::new(
                    "titleLength",
                    format!("Extend title to 30-60 characters (current: {len})"),
                ));
            } else if len > TITLE_MAX {
                out.push(Suggestion::new(
                    "titleLength",
                    format!("Shorten title to 30-60 characters (current: {len})"),
                ));
            }
        }
    }

    match &m.meta_description {
        None => out.push(Suggestion::new("meta", "Add a meta description")),
        Some(meta) => {
            let len = meta.chars().count();
            if len < META_MIN {
                out.push(Suggestion::new(
                    "metaLength",
                    format!("Improve meta description length (70-160 chars, current: {len})"),
                ));
            } else if len > META_MAX {
                out.push(Suggestion::new(
                    "metaLength",
                    format!("Shorten meta description to 70-160 characters (current: {len})"),
                ));
            }
        }
    }

    if m.h1_count == 0 {
        out.push(Suggestion::new("h1", "Add exactly one H1 heading"));
    } else if m.h1_count > 1 {
        out.push(Suggestion::new(
            "h1",
            format!("Use exactly one H1 (found {})", m.h1_count),
        ));
    }

    if m.thin_content {
        out.push(Suggestion::new(
            "wordCount",
            "Add more content (aim for 300+ words)",
        ));
    }

    if let Some(text) = &m.images.suggestion {
        out.push(Suggestion::new("imagesAlt", text.clone()));
    }

    if m.broken_count > 0 {
        out.push(Suggestion::new(
            "links",
            format!("Fix {} broken link(s)", m.broken_count),
        ));
    }

    if m.primary_keyword.is_some() && !m.primary_keyword_in_title {
        out.push(Suggestion::new(
            "keywordInTitle",
            "Include primary keyword in title",
        ));
    }
    if m.primary_keyword.is_some() && !m.primary_keyword_in_meta {
        out.push(Suggestion::new(
            "keywordInMeta",
            "Include primary keyword in meta description",
        ));
    }

    out
}

fn segment_score(ok: bool, partial: bool) -> u8 {
    if ok {
        100
    } else if partial {
        50
    } else {
        0
    }
}

/// Combine all signals into the weighted score, `round(sum of
/// weight * subscore / 100)`. No normalization: the weight total is the
/// ceiling.
///
/// When the caller supplies suggestions (the rule pass output) their
/// texts are carried through verbatim; otherwise the names of failing
/// categories stand in.
pub fn calculate_score(m: &PageMetrics, suggestions: &[Suggestion]) -> ScoreResult {
    // (key, weight, ok, partial); weights sum to 80
    let categories: [(&'static str, u32, bool, bool); 12] = [
        ("title", 10, m.title.is_some(), false),
        ("titleLength", 5, m.title_length_ok, m.title_length_partial),
        ("meta", 10, m.meta_description.is_some(), false),
        ("metaLength", 5, m.meta_length_ok, m.meta_length_partial),
        ("h1", 10, m.h1_count == 1, false),
        // Any h2 count satisfies this category; kept for weight parity
        ("headings", 5, true, false),
        ("wordCount", 10, !m.thin_content, false),
        ("readability", 5, m.readability_score >= 30, false),
        ("imagesAlt", 5, m.images.alt_coverage >= 80, false),
        ("links", 5, m.broken_count == 0, false),
        ("keywordInTitle", 5, m.primary_keyword_in_title, false),
        ("keywordInMeta", 5, m.primary_keyword_in_meta, false),
    ];

    let mut total = 0.0_f64;
    let mut breakdown = ScoreBreakdown::default();
    let mut failing: Vec<&'static str> = Vec::new();

    for (key, weight, ok, partial) in categories {
        let seg = segment_score(ok, partial);
        total += weight as f64 * (seg as f64 / 100.0);
        breakdown.set(key, seg);
        if !ok {
            failing.push(key);
        }
    }

    let score = total.round().clamp(0.0, 100.0) as u8;

    let suggestions = if suggestions.is_empty() {
        failing.into_iter().map(|key| key.to_string()).collect()
    } else {
        suggestions.iter().map(|s| s.text.clone()).collect()
    };

    ScoreResult {
        score,
        breakdown,
        suggestions,
    }
}
