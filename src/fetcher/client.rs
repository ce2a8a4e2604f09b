use crate::fetcher::{
    errors::FetchError,
    pipeline::process_response,
    types::{FetchOptions, PageResponse},
};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const USER_AGENT: &str = "SeoLens/0.1 (+https://seolens.example.com)";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

/// Shared client, also used by the link health checker.
pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

/// Fetch raw HTML for a page.
///
/// The timeout covers the whole request; reqwest cancels the in-flight
/// request when it fires, so no connection is left dangling. Non-2xx
/// responses after redirects fail with [`FetchError::Http`]; oversized
/// bodies are truncated downstream rather than rejected.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &Url, opts: &FetchOptions) -> Result<PageResponse, FetchError> {
    let response = HTTP_CLIENT
        .get(url.clone())
        .timeout(opts.timeout)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let body_bytes = response
        .bytes()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    debug!(bytes = body_bytes.len(), status = %status, "fetched page");

    Ok(process_response(
        final_url,
        status,
        body_bytes,
        &content_type,
        opts.max_body_bytes,
    ))
}
