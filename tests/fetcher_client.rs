use seolens::fetcher::{FetchError, FetchOptions, fetch};
use std::time::Duration;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn page_url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><head><title>Test</title></head><body>Hello World</body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/test");
    let result = fetch(&url, &FetchOptions::default()).await.unwrap();

    assert!(result.status.is_success());
    assert!(result.body.contains("Hello World"));
    assert!(!result.truncated);
    assert_eq!(result.url_final, url);
}

#[tokio::test]
async fn test_fetch_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/notfound");
    let result = fetch(&url, &FetchOptions::default()).await;

    match result {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 404),
        _ => panic!("Expected HTTP 404 error"),
    }
}

#[tokio::test]
async fn test_fetch_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/error");
    let result = fetch(&url, &FetchOptions::default()).await;

    match result {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 500),
        _ => panic!("Expected HTTP 500 error"),
    }
}

#[tokio::test]
async fn test_fetch_follows_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redirect"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/final"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Final page</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/redirect");
    let result = fetch(&url, &FetchOptions::default()).await.unwrap();

    assert!(result.status.is_success());
    assert!(result.body.contains("Final page"));
    assert!(result.url_final.path().ends_with("/final"));
}

#[tokio::test]
async fn test_oversized_body_is_truncated() {
    let mock_server = MockServer::start().await;

    let big_body = format!("<html><body>{}</body></html>", "word ".repeat(10_000));
    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(big_body.as_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/big");
    let opts = FetchOptions {
        timeout: Duration::from_secs(10),
        max_body_bytes: 1024,
    };
    let result = fetch(&url, &opts).await.unwrap();

    assert!(result.truncated);
    assert_eq!(result.body.len(), 1024);
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/slow");
    let opts = FetchOptions {
        timeout: Duration::from_millis(100),
        max_body_bytes: 1024 * 1024,
    };
    let result = fetch(&url, &opts).await;

    assert!(matches!(result, Err(FetchError::Timeout)));
}

#[tokio::test]
async fn test_non_utf8_page_is_decoded() {
    let mock_server = MockServer::start().await;

    // "café" in windows-1252: e9 for é
    let body = b"<html><body>caf\xe9</body></html>".to_vec();
    Mock::given(method("GET"))
        .and(path("/latin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html; charset=windows-1252"),
        )
        .mount(&mock_server)
        .await;

    let url = page_url(&mock_server, "/latin");
    let result = fetch(&url, &FetchOptions::default()).await.unwrap();

    assert!(result.body.contains("café"));
}
