//! One schemascope run: load the manifest, sample it, fetch the sampled
//! documents, extract their schemas, classify coverage and hand the result
//! to every report sink.

use chrono::Utc;
use indexmap::IndexMap;
use schema_coverage::{
    CoverageError, DocumentSchema, classify, group_counts, is_blank_document,
    sample,
};
use schemascope_config::RunConfig;
use sinks::{AnalysisReport, ArcDynReportSink, SinkError};
use sources::{DocumentFetcher, ManifestError, fetch_documents, load_manifest};
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub mod version;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Coverage(#[from] CoverageError),

    #[error("sink `{sink}` failed: {source}")]
    Sink {
        sink: String,
        #[source]
        source: SinkError,
    },
}

pub type RunResult<T> = Result<T, RunError>;

/// How a run ended when it did not fail.
#[derive(Debug)]
pub enum RunOutcome {
    /// Documents were analyzed and the report was emitted.
    Completed(Box<AnalysisReport>),
    /// Every sampled fetch failed, came back empty or was skipped; no report
    /// was emitted.
    NothingAnalyzed {
        sampled: usize,
        failed: usize,
        empty: usize,
        skipped: usize,
    },
}

/// Run one analysis.
///
/// A manifest that cannot be loaded fails before any fetch is issued.
/// Per-document fetch failures and empty documents only shrink the analyzed
/// set.
pub async fn run(
    cfg: &RunConfig,
    fetcher: &dyn DocumentFetcher,
    sinks: &[ArcDynReportSink],
) -> RunResult<RunOutcome> {
    let manifest = load_manifest(&cfg.manifest_path).await?;
    let categories = group_counts(&manifest.versions);
    info!(
        path = %cfg.manifest_path.display(),
        versions = manifest.versions.len(),
        "manifest loaded"
    );
    for (kind, count) in &categories {
        debug!(%kind, count, "manifest category");
    }

    let sampled = sample(&manifest.versions);
    info!(sampled = sampled.len(), "sampled versions");

    let fetched =
        o11y::timed("fetch", fetch_documents(fetcher, &sampled, &cfg.fetch))
            .await;

    let mut schemas: IndexMap<String, DocumentSchema> = IndexMap::new();
    let mut empty = 0;
    for (id, doc) in &fetched.documents {
        if is_blank_document(doc) {
            warn!(%id, "fetched document is empty; excluding it");
            empty += 1;
            continue;
        }
        schemas.insert(id.clone(), DocumentSchema::from_value(doc));
    }

    if schemas.is_empty() {
        warn!(
            sampled = sampled.len(),
            failed = fetched.failures.len(),
            empty,
            skipped = fetched.skipped.len(),
            "no documents analyzed"
        );
        return Ok(RunOutcome::NothingAnalyzed {
            sampled: sampled.len(),
            failed: fetched.failures.len(),
            empty,
            skipped: fetched.skipped.len(),
        });
    }

    let classification = classify(&schemas)?;

    let report = AnalysisReport {
        generated_at: Utc::now(),
        versions_found: manifest.versions.len(),
        categories,
        versions_sampled: sampled.len(),
        failed_fetches: fetched.failures.len(),
        empty_documents: empty,
        skipped: fetched.skipped.len(),
        classification,
        schemas,
    };

    emit_all(sinks, &report).await?;
    Ok(RunOutcome::Completed(Box::new(report)))
}

/// Emit to every sink, even after one fails; the first failure is returned.
async fn emit_all(
    sinks: &[ArcDynReportSink],
    report: &AnalysisReport,
) -> RunResult<()> {
    let mut first_err = None;
    for sink in sinks {
        if let Err(e) = sink.emit(report).await {
            error!(sink = sink.id(), error = %e, "sink emit failed");
            first_err.get_or_insert(RunError::Sink {
                sink: sink.id().to_string(),
                source: e,
            });
        }
    }
    first_err.map_or(Ok(()), Err)
}
