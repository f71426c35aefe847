//! Batched, paced fetching of sampled documents.
//!
//! Requests within a batch run concurrently and the whole batch is joined
//! before the next one starts. A fixed pause separates batches. A failed
//! request only drops its own document; it is logged and recorded in
//! [`FetchOutcome::failures`].

use futures::future::join_all;
use indexmap::IndexMap;
use schema_coverage::VersionEntry;
use schemascope_config::FetchConfig;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::DocumentFetcher;

/// A sampled entry whose document could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub id: String,
    pub url: String,
    pub error: String,
}

/// What a fetch run produced.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Parsed documents keyed by entry id, in sample order.
    pub documents: IndexMap<String, Value>,
    pub failures: Vec<FetchFailure>,
    /// Ids of entries that had no URL to fetch.
    pub skipped: Vec<String>,
}

impl FetchOutcome {
    pub fn attempted(&self) -> usize {
        self.documents.len() + self.failures.len()
    }
}

/// Fetch every entry's document in batches of `cfg.batch_size`.
///
/// Never fails as a whole: per-entry errors end up in the outcome.
pub async fn fetch_documents(
    fetcher: &dyn DocumentFetcher,
    entries: &[VersionEntry],
    cfg: &FetchConfig,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();

    let mut targets: Vec<(&str, &str)> = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => targets.push((entry.id.as_str(), url)),
            None => {
                warn!(id = %entry.id, "manifest entry has no url; skipping");
                outcome.skipped.push(entry.id.clone());
            }
        }
    }

    let batch_size = cfg.batch_size.max(1);
    let total_batches = targets.len().div_ceil(batch_size);

    for (idx, batch) in targets.chunks(batch_size).enumerate() {
        info!(
            batch = idx + 1,
            total = total_batches,
            size = batch.len(),
            "fetching batch"
        );

        let results = join_all(batch.iter().map(|&(id, url)| async move {
            (id, url, fetcher.fetch(url).await)
        }))
        .await;

        for (id, url, result) in results {
            match result {
                Ok(doc) => {
                    outcome.documents.insert(id.to_string(), doc);
                }
                Err(e) => {
                    warn!(%id, %url, error = %e, "fetch failed; excluding document");
                    outcome.failures.push(FetchFailure {
                        id: id.to_string(),
                        url: url.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if idx + 1 < total_batches {
            sleep(cfg.batch_pause()).await;
        }
    }

    info!(
        fetched = outcome.documents.len(),
        failed = outcome.failures.len(),
        skipped = outcome.skipped.len(),
        "fetch complete"
    );
    outcome
}
