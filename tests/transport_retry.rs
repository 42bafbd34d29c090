//! Transport-level behavior of the Cloudflare client: retry on rate
//! limiting, fail-fast on rejected credentials, pagination exhaustion.
//!
//! Each test runs a local TCP server that plays back a fixed queue of
//! canned HTTP responses, one per connection.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use dmarc_audit::cloudflare::{CloudflareApi, DnsApi};
use dmarc_audit::config::RETRY_MAX_ATTEMPTS;
use dmarc_audit::error_handling::ApiError;

/// Builds one canned HTTP response. `Connection: close` forces the client
/// onto a fresh connection per request, so the accept count equals the
/// request count.
fn canned(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Serves the queued responses in order, counting requests. Requests made
/// after the queue drains get a 500.
async fn start_canned_server(responses: Vec<String>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test server");
    let addr = listener.local_addr().expect("failed to get address");
    let hits = Arc::new(AtomicUsize::new(0));
    let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

    let hits_for_server = Arc::clone(&hits);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let hits = Arc::clone(&hits_for_server);
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                // Drain the request head; these tests only issue bodyless GETs
                let mut buf = vec![0u8; 8192];
                let mut total = 0;
                while total < buf.len() {
                    match socket.read(&mut buf[total..]).await {
                        Ok(0) => break,
                        Ok(n) => {
                            total += n;
                            if buf[..total].windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                        Err(_) => return,
                    }
                }
                hits.fetch_add(1, Ordering::SeqCst);
                let response = queue
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| canned("500 Internal Server Error", "{}"));
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), hits)
}

fn client() -> Arc<reqwest::Client> {
    Arc::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap(),
    )
}

fn records_envelope() -> String {
    canned(
        "200 OK",
        r#"{"success":true,"errors":[],"result":[{"id":"r1","content":"v=spf1 -all"}],"result_info":null}"#,
    )
}

#[tokio::test]
async fn test_rate_limited_request_retries_to_success() {
    let (url, hits) = start_canned_server(vec![
        canned("429 Too Many Requests", r#"{"success":false,"errors":[],"result":null,"result_info":null}"#),
        records_envelope(),
    ])
    .await;
    let api = CloudflareApi::with_base_url(client(), url);

    let records = api
        .get_txt_records("z1", "example.com")
        .await
        .expect("the retry should absorb a single 429");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].content, "v=spf1 -all");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rejected_credential_fails_on_first_attempt() {
    let (url, hits) = start_canned_server(vec![canned(
        "403 Forbidden",
        r#"{"success":false,"errors":[{"code":9109,"message":"Invalid access token"}],"result":null,"result_info":null}"#,
    )])
    .await;
    let api = CloudflareApi::with_base_url(client(), url);

    let error = api
        .get_txt_records("z1", "example.com")
        .await
        .expect_err("a rejected credential must not be retried");

    assert_eq!(error, ApiError::AuthRejected(403));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_persistent_rate_limiting_exhausts_retries() {
    let rate_limited = canned(
        "429 Too Many Requests",
        r#"{"success":false,"errors":[],"result":null,"result_info":null}"#,
    );
    let attempts = RETRY_MAX_ATTEMPTS + 1;
    let (url, hits) = start_canned_server(vec![rate_limited; attempts]).await;
    let api = CloudflareApi::with_base_url(client(), url);

    let error = api
        .get_txt_records("z1", "example.com")
        .await
        .expect_err("persistent 429s must eventually surface");

    assert_eq!(error, ApiError::RateLimited);
    assert_eq!(hits.load(Ordering::SeqCst), attempts);
}

#[tokio::test]
async fn test_zone_listing_exhausts_pagination() {
    let page1 = canned(
        "200 OK",
        r#"{"success":true,"errors":[],"result":[{"id":"z1","name":"a.com"},{"id":"z2","name":"b.com"}],"result_info":{"page":1,"total_pages":2}}"#,
    );
    let page2 = canned(
        "200 OK",
        r#"{"success":true,"errors":[],"result":[{"id":"z3","name":"c.com"}],"result_info":{"page":2,"total_pages":2}}"#,
    );
    let (url, hits) = start_canned_server(vec![page1, page2]).await;
    let api = CloudflareApi::with_base_url(client(), url);

    let zones = api.list_zones().await.expect("listing should succeed");

    let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, ["a.com", "b.com", "c.com"]);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_envelope_failure_surfaces_api_message() {
    let (url, hits) = start_canned_server(vec![canned(
        "200 OK",
        r#"{"success":false,"errors":[{"code":7003,"message":"Could not route to /zones/bogus"}],"result":null,"result_info":null}"#,
    )])
    .await;
    let api = CloudflareApi::with_base_url(client(), url);

    let error = api
        .get_txt_records("bogus", "example.com")
        .await
        .expect_err("an unsuccessful envelope is an error");

    let ApiError::Api(message) = error else {
        panic!("expected an API envelope error, got {error:?}");
    };
    assert!(message.contains("Could not route"), "got: {message}");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
