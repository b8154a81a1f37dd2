use chrono::Utc;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use crate::content::{parse_delimited, Game, GamesDocument, Project, ProjectsDocument, Record};
use crate::Error;
use super::{fallback, Fetcher};

/// Why a source fell back to substitute records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Network(String),
    Status { code: u16, reason: String },
    Parse(String),
    /// Well-formed JSON whose top level or entries do not fit the document.
    Shape(String),
    Empty,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Network(msg) => write!(f, "network error: {}", msg),
            FallbackReason::Status { code, reason } => write!(f, "HTTP {} {}", code, reason),
            FallbackReason::Parse(msg) => write!(f, "parse error: {}", msg),
            FallbackReason::Shape(msg) => write!(f, "unexpected document shape: {}", msg),
            FallbackReason::Empty => write!(f, "empty response"),
        }
    }
}

impl From<Error> for FallbackReason {
    fn from(err: Error) -> Self {
        match err {
            Error::Api { code, message } => FallbackReason::Status { code, reason: message },
            Error::Http(e) if e.is_decode() => FallbackReason::Parse(e.to_string()),
            Error::Http(e) => match e.status() {
                Some(status) => FallbackReason::Status {
                    code: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                },
                None => FallbackReason::Network(e.to_string()),
            },
            Error::Json(e) if e.is_data() => FallbackReason::Shape(e.to_string()),
            Error::Json(e) => FallbackReason::Parse(e.to_string()),
            Error::InvalidData(msg) => FallbackReason::Parse(msg),
            other => FallbackReason::Network(other.to_string()),
        }
    }
}

/// Records from a source, and whether they are the live data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(Vec<T>),
    Fallback { records: Vec<T>, reason: FallbackReason },
}

impl<T> LoadOutcome<T> {
    pub fn records(&self) -> &[T] {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::Fallback { records, .. } => records,
        }
    }

    pub fn into_records(self) -> Vec<T> {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::Fallback { records, .. } => records,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    /// `Ok` with live records, or `Err` with the reason the source fell back.
    pub fn as_result(&self) -> std::result::Result<&[T], &FallbackReason> {
        match self {
            LoadOutcome::Loaded(records) => Ok(records),
            LoadOutcome::Fallback { reason, .. } => Err(reason),
        }
    }
}

/// Loads projects, games and updates. Never fails outward: any error is
/// logged and replaced with a fallback set.
#[derive(Debug, Clone)]
pub struct RecordLoader {
    fetcher: Arc<dyn Fetcher>,
}

impl RecordLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    async fn fetch_non_empty(&self, url: &str) -> std::result::Result<String, FallbackReason> {
        let text = self.fetcher.fetch_text(url).await?;
        if text.trim().is_empty() {
            return Err(FallbackReason::Empty);
        }
        Ok(text)
    }

    async fn fetch_json<D: DeserializeOwned>(&self, url: &str) -> std::result::Result<D, FallbackReason> {
        let text = self.fetch_non_empty(url).await?;
        serde_json::from_str(&text).map_err(|e| FallbackReason::from(Error::Json(e)))
    }

    pub async fn load_projects(&self, url: &str) -> LoadOutcome<Project> {
        match self.fetch_json::<ProjectsDocument>(url).await {
            Ok(doc) => {
                info!("Loaded {} projects from {}", doc.projects.len(), url);
                LoadOutcome::Loaded(doc.projects)
            }
            Err(reason) => {
                warn!("Cannot load projects from {}: {}; using fallback projects", url, reason);
                LoadOutcome::Fallback { records: fallback::projects(), reason }
            }
        }
    }

    pub async fn load_games(&self, url: &str) -> LoadOutcome<Game> {
        match self.fetch_json::<GamesDocument>(url).await {
            Ok(doc) => {
                info!("Loaded {} games from {}", doc.games.len(), url);
                LoadOutcome::Loaded(doc.games)
            }
            Err(reason) => {
                warn!("Cannot load games from {}: {}; using fallback games", url, reason);
                LoadOutcome::Fallback { records: fallback::games(), reason }
            }
        }
    }

    pub async fn load_updates(&self, url: &str) -> LoadOutcome<Record> {
        match self.fetch_non_empty(url).await {
            Ok(text) => {
                let records = parse_delimited(&text);
                info!("Loaded {} updates from {}", records.len(), url);
                LoadOutcome::Loaded(records)
            }
            Err(reason) => {
                warn!("Cannot load updates from {}: {}; generating sample updates", url, reason);
                LoadOutcome::Fallback {
                    records: fallback::sample_updates(Utc::now().date_naive()),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct StubFetcher {
        responses: HashMap<String, std::result::Result<String, u16>>,
    }

    impl StubFetcher {
        fn with(mut self, url: &str, response: std::result::Result<&str, u16>) -> Self {
            self.responses.insert(url.to_string(), response.map(str::to_string));
            self
        }

        fn loader(self) -> RecordLoader {
            RecordLoader::new(Arc::new(self))
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch_text(&self, url: &str) -> crate::Result<String> {
            match self.responses.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(code)) => Err(Error::Api { code: *code, message: "Not Found".to_string() }),
                None => Err(Error::NotFound(url.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn loads_projects_document() {
        let loader = StubFetcher::default()
            .with("p", Ok(r#"{"projects": [{"title": "Lantern", "status": "Completed"}]}"#))
            .loader();

        let outcome = loader.load_projects("p").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.records()[0].title.as_deref(), Some("Lantern"));
        assert!(outcome.as_result().is_ok());
    }

    #[tokio::test]
    async fn http_404_falls_back_to_error_projects() {
        let loader = StubFetcher::default().with("p", Err(404)).loader();

        let outcome = loader.load_projects("p").await;
        assert_eq!(
            outcome.fallback_reason(),
            Some(&FallbackReason::Status { code: 404, reason: "Not Found".to_string() })
        );
        assert_eq!(outcome.records(), fallback::projects().as_slice());
    }

    #[tokio::test]
    async fn rejected_fetch_falls_back_to_error_games() {
        let loader = StubFetcher::default().loader();

        let outcome = loader.load_games("missing").await;
        assert!(matches!(outcome.fallback_reason(), Some(FallbackReason::Network(_))));
        assert!(!outcome.records().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_fallback() {
        let loader = StubFetcher::default().with("g", Ok("{\"games\": [oops")).loader();

        let outcome = loader.load_games("g").await;
        assert!(matches!(outcome.fallback_reason(), Some(FallbackReason::Parse(_))));
        assert_eq!(outcome.into_records(), fallback::games());
    }

    #[tokio::test]
    async fn well_formed_json_of_the_wrong_shape_is_a_shape_fallback() {
        let loader = StubFetcher::default()
            .with("wrong-key", Ok(r#"{"projects": []}"#))
            .with("wrong-entry", Ok(r#"{"games": [{"title": "Moss", "tags": "Puzzle"}]}"#))
            .loader();

        for url in ["wrong-key", "wrong-entry"] {
            let outcome = loader.load_games(url).await;
            assert!(matches!(outcome.as_result(), Err(FallbackReason::Shape(_))), "{url}");
            assert_eq!(outcome.into_records(), fallback::games());
        }
    }

    #[tokio::test]
    async fn empty_project_list_is_loaded_not_fallback() {
        let loader = StubFetcher::default().with("p", Ok(r#"{"projects": []}"#)).loader();

        let outcome = loader.load_projects("p").await;
        assert_eq!(outcome, LoadOutcome::Loaded(vec![]));
    }

    #[tokio::test]
    async fn updates_are_parsed_and_sorted() {
        let csv = "date,title,content\n2024-01-01,Old,x\n2024-02-01,New,y\n";
        let loader = StubFetcher::default().with("u", Ok(csv)).loader();

        let outcome = loader.load_updates("u").await;
        let titles: Vec<&str> = outcome.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[tokio::test]
    async fn blank_update_feed_generates_samples() {
        let loader = StubFetcher::default().with("u", Ok("  \n")).loader();

        let outcome = loader.load_updates("u").await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Empty));
        assert_eq!(outcome.records().len(), 3);
        assert_eq!(outcome.as_result().unwrap_err(), &FallbackReason::Empty);
    }

    #[tokio::test]
    async fn failed_update_feed_generates_samples() {
        let loader = StubFetcher::default().with("u", Err(500)).loader();

        let outcome = loader.load_updates("u").await;
        assert!(outcome.is_fallback());
        assert!(!outcome.records().is_empty());
    }
}
