//! Single-page SEO analysis pipeline.
//!
//! Given a URL or pasted content, the pipeline extracts SEO signals
//! (title/meta quality, heading structure, content volume, readability,
//! sentiment, keyword distribution, image alt coverage, link health),
//! derives a weighted 0-100 score with suggestions, and produces a report
//! for a pluggable store. HTTP routing, auth and durable persistence are
//! the consuming service's concern.

pub mod analyzer;
pub mod config;
pub mod document;
pub mod fetcher;
pub mod links;
pub mod metrics;
pub mod score;
pub mod store;

pub use analyzer::{AnalysisInput, AnalyzeError, Analyzer, ReportData, ReportType};
pub use config::Config;
pub use store::{InMemoryReportStore, Report, ReportStore};
