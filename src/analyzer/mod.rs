//! The analysis orchestrator.
//!
//! Two entry pipelines share everything past ingestion:
//! URL mode fetches a live page, text mode analyzes pasted content with an
//! empty link set (no origin, so relative resolution is undefined). Each
//! run owns its document and metrics; nothing is shared across runs except
//! the report store.

use crate::config::Config;
use crate::document::{Headings, ParsedDocument};
use crate::fetcher::{self, FetchError, FetchOptions};
use crate::links;
use crate::metrics::PageMetrics;
use crate::metrics::images::ImageAudit;
use crate::metrics::keywords::KeywordDensity;
use crate::metrics::sentiment::Sentiment;
use crate::score::{self, ScoreBreakdown, ScoreResult};
use crate::store::{Report, ReportStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

/// Pasted content above this many bytes is rejected outright.
pub const CONTENT_SIZE_LIMIT: usize = 500 * 1024;

/// What the caller wants analyzed. Exactly one payload, by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AnalysisInput {
    Url { url: String },
    Text { content: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "TEXT")]
    Text,
}

/// The normalized result of one successful analysis, shaped for the
/// consuming request layer and for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub input: String,
    pub url: Option<String>,
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
    pub images: ImageAudit,
    pub link_stats: links::LinkStats,
    pub broken_links: Vec<links::ProbedLink>,
    pub broken_count: usize,
    pub duplicate_title: bool,
    pub duplicate_meta: bool,
    pub suggestions: Vec<String>,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

impl ReportData {
    fn assemble(
        kind: ReportType,
        input: String,
        url: Option<String>,
        metrics: PageMetrics,
        scored: ScoreResult,
    ) -> Self {
        Self {
            kind,
            input,
            url,
            title: metrics.title,
            meta_description: metrics.meta_description,
            headings: metrics.headings,
            word_count: metrics.word_count,
            thin_content: metrics.thin_content,
            readability_score: metrics.readability_score,
            sentiment: metrics.sentiment,
            keywords: metrics.keywords,
            keyword_density: metrics.keyword_density,
            primary_keyword: metrics.primary_keyword,
            images: metrics.images,
            link_stats: metrics.link_stats,
            broken_links: metrics.broken_links,
            broken_count: metrics.broken_count,
            duplicate_title: metrics.duplicate_title,
            duplicate_meta: metrics.duplicate_meta,
            suggestions: scored.suggestions,
            score: scored.score,
            breakdown: scored.breakdown,
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Content too large")]
    ContentTooLarge,

    #[error("Content is empty")]
    ContentEmpty,

    #[error("analysis failed: {0}")]
    Store(#[from] anyhow::Error),
}

impl AnalyzeError {
    /// Map internal failures to the message shown to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::Fetch(FetchError::Dns(_)) => {
                "Could not resolve URL. Check the address and try again.".to_string()
            }
            Self::Fetch(FetchError::Connect(_)) => {
                "Could not reach the URL. The site may be down or blocking requests.".to_string()
            }
            Self::Fetch(FetchError::Timeout) => {
                "Request timed out. The site may be slow or unavailable.".to_string()
            }
            Self::Fetch(err @ FetchError::Http { .. }) => err.to_string(),
            Self::Fetch(FetchError::InvalidUrl(_)) => "Invalid URL".to_string(),
            Self::ContentTooLarge => "Content too large".to_string(),
            Self::ContentEmpty => "Content is empty".to_string(),
            _ => "Analysis failed".to_string(),
        }
    }
}

/// Runs the full pipeline for one input and hands results to the store.
pub struct Analyzer {
    config: Config,
    store: Arc<dyn ReportStore>,
}

impl Analyzer {
    pub fn new(config: Config, store: Arc<dyn ReportStore>) -> Self {
        Self { config, store }
    }

    /// Dispatch on the input mode.
    pub async fn analyze(
        &self,
        input: &AnalysisInput,
        user_id: Uuid,
    ) -> Result<ReportData, AnalyzeError> {
        match input {
            AnalysisInput::Url { url } => self.analyze_url(url, user_id).await,
            AnalysisInput::Text { content } => self.analyze_pasted_content(content, user_id).await,
        }
    }

    /// Fetch a page and analyze it.
    ///
    /// The URL is stripped of whitespace and defaulted to `https://` when
    /// no scheme is given. Fetch failures surface as [`AnalyzeError::Fetch`]
    /// with a user-facing mapping; link probe failures never do.
    #[instrument(skip_all, fields(url = %url, user_id = %user_id))]
    pub async fn analyze_url(
        &self,
        url: &str,
        user_id: Uuid,
    ) -> Result<ReportData, AnalyzeError> {
        let sanitized: String = url.split_whitespace().collect();
        if sanitized.is_empty() {
            return Err(AnalyzeError::InvalidInput(
                "url required for URL mode".to_string(),
            ));
        }
        let full_url = if sanitized.starts_with("http") {
            sanitized
        } else {
            format!("https://{sanitized}")
        };
        let parsed_url = Url::parse(&full_url).map_err(FetchError::InvalidUrl)?;

        let opts = FetchOptions {
            timeout: self.config.fetch_timeout(),
            max_body_bytes: self.config.html_size_limit(),
        };
        let page = fetcher::fetch(&parsed_url, &opts).await?;

        debug!("parsing document");
        let doc = ParsedDocument::parse(&page.body);
        let mut metrics = PageMetrics::derive(&doc);
        metrics.set_links(links::extract_links(&doc.anchors, &page.url_final));

        debug!(links = metrics.link_stats.total, "checking link health");
        let checked = links::check_broken_links(
            &metrics.links,
            self.config.link_check_limit(),
            self.config.link_timeout(),
        )
        .await;
        metrics.broken_count = checked.broken_count;
        metrics.broken_links = checked.broken;

        self.apply_duplicates(&mut metrics, user_id).await?;

        let suggestions = score::build_suggestions(&metrics);
        let scored = score::calculate_score(&metrics, &suggestions);
        debug!(score = scored.score, "analysis complete");

        Ok(ReportData::assemble(
            ReportType::Url,
            full_url.clone(),
            Some(full_url),
            metrics,
            scored,
        ))
    }

    /// Analyze pasted HTML or plain text. No fetch, no link checking.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn analyze_pasted_content(
        &self,
        content: &str,
        user_id: Uuid,
    ) -> Result<ReportData, AnalyzeError> {
        let content = content.trim();
        if content.len() > CONTENT_SIZE_LIMIT {
            return Err(AnalyzeError::ContentTooLarge);
        }
        if content.is_empty() {
            return Err(AnalyzeError::ContentEmpty);
        }

        let doc = ParsedDocument::from_pasted(content);
        let mut metrics = PageMetrics::derive(&doc);

        self.apply_duplicates(&mut metrics, user_id).await?;

        let suggestions = score::build_suggestions(&metrics);
        let scored = score::calculate_score(&metrics, &suggestions);
        debug!(score = scored.score, "analysis complete");

        Ok(ReportData::assemble(
            ReportType::Text,
            "Pasted content".to_string(),
            None,
            metrics,
            scored,
        ))
    }

    /// Analyze and persist in one step.
    pub async fn analyze_and_store(
        &self,
        input: &AnalysisInput,
        user_id: Uuid,
    ) -> Result<Report, AnalyzeError> {
        let data = self.analyze(input, user_id).await?;
        Ok(self.store.create(user_id, data).await?)
    }

    /// Case-insensitive exact match against the user's prior reports.
    async fn apply_duplicates(
        &self,
        metrics: &mut PageMetrics,
        user_id: Uuid,
    ) -> Result<(), AnalyzeError> {
        let prior = self.store.find_by_user(user_id).await?;

        metrics.duplicate_title = matches_prior(metrics.title.as_deref(), &prior, |r| {
            r.data.title.as_deref()
        });
        metrics.duplicate_meta = matches_prior(metrics.meta_description.as_deref(), &prior, |r| {
            r.data.meta_description.as_deref()
        });
        Ok(())
    }
}

fn matches_prior<F>(current: Option<&str>, prior: &[Report], field: F) -> bool
where
    F: Fn(&Report) -> Option<&str>,
{
    let Some(current) = current else {
        return false;
    };
    let current = current.to_lowercase();
    prior
        .iter()
        .any(|report| field(report).is_some_and(|v| v.to_lowercase() == current))
}
