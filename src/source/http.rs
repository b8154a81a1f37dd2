use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA}};
use std::time::Duration;
use tracing::debug;
use url::Url;
use crate::{Error, Result};
use super::Fetcher;

/// Fetches source documents over HTTP, defeating intermediate caches.
///
/// Locations without an `http`/`https` scheme are read from the local
/// filesystem instead, which is how sites built from a checkout point at
/// their own `projects.json`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

/// Append a `t=<unix millis>` query parameter so every request misses the cache.
pub fn cache_busted(url: &str) -> Result<Url> {
    let mut url = Url::parse(url)?;
    url.query_pairs_mut()
        .append_pair("t", &Utc::now().timestamp_millis().to_string());
    Ok(url)
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        if !is_remote(url) {
            debug!("Reading {}", url);
            return Ok(tokio::fs::read_to_string(url).await?);
        }

        let url = cache_busted(url)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Api {
                code: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_buster_keeps_existing_query() {
        let url = cache_busted("https://docs.google.com/spreadsheets/d/e/x/pub?output=csv").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("output".to_string(), "csv".to_string()));
        assert_eq!(pairs[1].0, "t");
        assert!(pairs[1].1.parse::<i64>().is_ok());
    }

    #[test]
    fn only_http_locations_are_remote() {
        assert!(is_remote("https://example.org/games.json"));
        assert!(is_remote("http://localhost:8080/games.json"));
        assert!(!is_remote("data/games.json"));
    }

    #[tokio::test]
    async fn local_paths_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, r#"{"projects": []}"#).unwrap();

        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        let text = fetcher.fetch_text(path.to_str().unwrap()).await.unwrap();
        assert_eq!(text, r#"{"projects": []}"#);
    }

    #[tokio::test]
    async fn missing_local_file_is_an_io_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch_text("/nonexistent/folio/projects.json").await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn relative_urls_are_rejected() {
        let err = cache_busted("projects.json").unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
    }
}
