//! Anchor resolution and bounded, concurrent link health checking.

use crate::fetcher::get_client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::{Origin, Url};

/// A resolved hyperlink, classified against the source page's origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub internal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
}

impl LinkStats {
    pub fn from_links(links: &[Link]) -> Self {
        let internal = links.iter().filter(|l| l.internal).count();
        Self {
            total: links.len(),
            internal,
            external: links.len() - internal,
        }
    }
}

/// Outcome of one reachability probe. Status 0 means the probe itself
/// failed (connect error, timeout, join failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbedLink {
    pub href: String,
    pub ok: bool,
    pub status: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCheckResult {
    pub total_checked: usize,
    pub broken: Vec<ProbedLink>,
    pub broken_count: usize,
}

/// Resolve raw anchor hrefs against the page origin and classify them.
///
/// Fragment-only and `javascript:` targets are skipped, as is anything
/// that fails to resolve; extraction never errors.
pub fn extract_links(anchors: &[String], page_url: &Url) -> Vec<Link> {
    let page_origin = page_url.origin();
    let Origin::Tuple(..) = page_origin else {
        return Vec::new();
    };
    let Ok(base) = Url::parse(&page_origin.ascii_serialization()) else {
        return Vec::new();
    };

    anchors
        .iter()
        .filter_map(|raw| {
            let href = raw.trim();
            if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
                return None;
            }
            let resolved = base.join(href).ok()?;
            let internal = resolved.origin() == page_origin;
            Some(Link {
                href: resolved.to_string(),
                internal,
            })
        })
        .collect()
}

/// Probe at most the first `limit` links concurrently, each under its own
/// timeout, and report the unreachable ones.
///
/// Probe failures are absorbed as data (`ok: false, status: 0`); a dead
/// link must never fail the analysis. Results keep input order: tasks are
/// spawned up front and joined in sequence.
pub async fn check_broken_links(
    links: &[Link],
    limit: usize,
    timeout: Duration,
) -> LinkCheckResult {
    let to_check = &links[..links.len().min(limit)];
    if to_check.is_empty() {
        return LinkCheckResult::default();
    }

    let handles: Vec<_> = to_check
        .iter()
        .map(|link| tokio::spawn(probe(link.href.clone(), timeout)))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (handle, link) in handles.into_iter().zip(to_check) {
        let outcome = handle.await.unwrap_or_else(|_| ProbedLink {
            href: link.href.clone(),
            ok: false,
            status: 0,
        });
        results.push(outcome);
    }

    let total_checked = results.len();
    let broken: Vec<ProbedLink> = results.into_iter().filter(|r| !r.ok).collect();
    debug!(total_checked, broken = broken.len(), "link health check done");

    LinkCheckResult {
        total_checked,
        broken_count: broken.len(),
        broken,
    }
}

async fn probe(href: String, timeout: Duration) -> ProbedLink {
    // HEAD keeps the probe cheap; reqwest follows redirects and cancels
    // the request when the timeout fires.
    match get_client().head(&href).timeout(timeout).send().await {
        Ok(response) => ProbedLink {
            ok: response.status().is_success(),
            status: response.status().as_u16(),
            href,
        },
        Err(_) => ProbedLink {
            href,
            ok: false,
            status: 0,
        },
    }
}
