use async_trait::async_trait;
use crate::Result;

pub mod http;
pub mod fallback;
pub mod loader;

pub use http::HttpFetcher;
pub use loader::{FallbackReason, LoadOutcome, RecordLoader};

/// Transport used by the loader to pull raw source text.
#[async_trait]
pub trait Fetcher: Send + Sync + std::fmt::Debug {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
