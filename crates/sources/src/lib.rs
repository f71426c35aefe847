//! Document sources for schemascope.
//!
//! - **Manifest**: loads the list of versioned documents to analyze
//! - **Fetching**: retrieves sampled documents in paced, concurrent batches
//!
//! The fetch orchestrator talks to the network only through
//! [`DocumentFetcher`], so tests and alternative transports can plug in
//! without touching the batching logic.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

mod errors;
pub mod fetch;
pub mod http;
pub mod manifest;

pub use errors::{FetchError, FetchResult, ManifestError, ManifestResult};
pub use fetch::{FetchFailure, FetchOutcome, fetch_documents};
pub use http::HttpFetcher;
pub use manifest::{LatestVersions, VersionManifest, load_manifest};

/// Retrieves one JSON document by URL.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<Value>;
}

pub type ArcDynFetcher = Arc<dyn DocumentFetcher>;
