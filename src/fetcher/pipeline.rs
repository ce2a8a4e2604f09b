use crate::fetcher::types::PageResponse;
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decode the raw body to UTF-8 and enforce the size ceiling.
///
/// Decoding is lossy on purpose: analysis tolerates replacement characters,
/// and a page with a mislabeled charset should still produce a report.
pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
    max_body_bytes: usize,
) -> PageResponse {
    let encoding = detect_charset(content_type, &body_bytes);
    let (decoded, _, had_errors) = encoding.decode(&body_bytes);
    if had_errors {
        warn!(url = %url_final, charset = encoding.name(), "body decoded with replacement characters");
    }

    let mut body = decoded.into_owned();
    let truncated = body.len() > max_body_bytes;
    if truncated {
        warn!(url = %url_final, size = body.len(), limit = max_body_bytes, "body exceeds size ceiling, truncating");
        truncate_at_char_boundary(&mut body, max_body_bytes);
    }

    PageResponse {
        url_final,
        status,
        body,
        truncated,
        fetched_at: Utc::now(),
    }
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    // 1. Content-Type header charset
    if let Some(captures) = CHARSET_REGEX.captures(content_type)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
    {
        return encoding;
    }

    // 2. <meta> declarations in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    for regex in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(captures) = regex.captures(&search_str)
            && let Some(charset_str) = captures.get(1)
            && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
        {
            return encoding;
        }
    }

    // 3. Heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}
