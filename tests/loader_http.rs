use folio::source::{FallbackReason, HttpFetcher, LoadOutcome, RecordLoader};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve one canned HTTP response and hand back the raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&request).to_string());
    });

    (format!("http://{}", addr), rx)
}

fn loader() -> RecordLoader {
    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    RecordLoader::new(Arc::new(fetcher))
}

#[tokio::test]
async fn loads_projects_with_cache_busting() {
    let (base, request) = serve_once("200 OK", r#"{"projects": [{"title": "Lantern"}]}"#).await;

    let outcome = loader().load_projects(&format!("{}/projects.json", base)).await;
    assert!(!outcome.is_fallback());
    assert_eq!(outcome.records()[0].title.as_deref(), Some("Lantern"));

    let request = request.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /projects.json?t="));
    assert!(request.contains("pragma: no-cache"));
    assert!(request.contains("cache-control: no-cache"));
}

#[tokio::test]
async fn http_404_yields_fallback_games() {
    let (base, _request) = serve_once("404 Not Found", "missing").await;

    let outcome = loader().load_games(&format!("{}/games.json", base)).await;
    assert_eq!(
        outcome.fallback_reason(),
        Some(&FallbackReason::Status { code: 404, reason: "Not Found".to_string() })
    );
    assert!(!outcome.records().is_empty());
}

#[tokio::test]
async fn refused_connection_yields_sample_updates() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = loader().load_updates(&format!("http://{}/feed.csv", addr)).await;
    match outcome {
        LoadOutcome::Fallback { records, reason } => {
            assert!(matches!(reason, FallbackReason::Network(_)));
            assert_eq!(records.len(), 3);
        }
        LoadOutcome::Loaded(_) => panic!("expected fallback"),
    }
}

#[tokio::test]
async fn csv_feed_is_parsed_over_http() {
    let (base, _request) = serve_once(
        "200 OK",
        "date,title,content,image\r\n2024-01-01,\"Title, with comma\",Body,\r\n2024-02-01,Newer,Body,@https://example.org/a.png\r\n",
    )
    .await;

    let outcome = loader().load_updates(&format!("{}/pub?output=csv", base)).await;
    let records = outcome.as_result().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Newer");
    assert_eq!(records[0].image_url(), Some("https://example.org/a.png"));
    assert_eq!(records[1].title, "Title, with comma");
}
