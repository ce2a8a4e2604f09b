use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Per-fetch bounds, usually derived from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// A fetched page, decoded to UTF-8 and bounded to the size ceiling.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body: String,
    /// True when the decoded body exceeded the ceiling and was cut.
    pub truncated: bool,
    pub fetched_at: DateTime<Utc>,
}
