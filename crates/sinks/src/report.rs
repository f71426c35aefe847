//! The analysis handed to every sink, and its persisted JSON shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use schema_coverage::{Classification, DocumentSchema, FieldCoverage};
use serde::Serialize;

/// Everything a run learned, ready to be rendered.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    /// Entries listed in the manifest.
    pub versions_found: usize,
    /// Entries per category, in manifest order.
    pub categories: IndexMap<String, usize>,
    pub versions_sampled: usize,
    pub failed_fetches: usize,
    /// Fetched documents with no content (`{}`, `[]`, `null`, ...).
    pub empty_documents: usize,
    /// Sampled entries without a URL.
    pub skipped: usize,
    pub classification: Classification,
    /// Schema of every analyzed document, in fetch order.
    pub schemas: IndexMap<String, DocumentSchema>,
}

impl AnalysisReport {
    pub fn versions_analyzed(&self) -> usize {
        self.schemas.len()
    }

    pub fn to_json_report(&self) -> JsonReport {
        let c = &self.classification;
        JsonReport {
            generated_at: self.generated_at.to_rfc3339(),
            summary: Summary {
                total_versions_found: self.versions_found,
                total_versions_sampled: self.versions_sampled,
                total_versions_analyzed: self.versions_analyzed(),
                failed_fetches: self.failed_fetches,
                empty_documents: self.empty_documents,
                skipped_versions: self.skipped,
                total_unique_fields: c.unique_fields(),
                universal_fields_count: c.universal.len(),
                partial_fields_count: c.partial.len(),
                rare_fields_count: c.rare.len(),
            },
            universal_fields: c.universal.iter().map(ToString::to_string).collect(),
            partial_fields: coverage_map(&c.partial),
            rare_fields: coverage_map(&c.rare),
            version_schemas: self
                .schemas
                .iter()
                .map(|(id, schema)| (id.clone(), schema.labels()))
                .collect(),
        }
    }
}

fn coverage_map(fields: &[FieldCoverage]) -> BTreeMap<String, FieldCoverageEntry> {
    fields
        .iter()
        .map(|f| {
            (
                f.field.to_string(),
                FieldCoverageEntry {
                    coverage_percent: f.coverage_percent(),
                    versions: f.documents.clone(),
                },
            )
        })
        .collect()
}

/// Persisted report document.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub summary: Summary,
    /// Sorted.
    pub universal_fields: Vec<String>,
    pub partial_fields: BTreeMap<String, FieldCoverageEntry>,
    pub rare_fields: BTreeMap<String, FieldCoverageEntry>,
    /// Document key to its sorted descriptors.
    pub version_schemas: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_versions_found: usize,
    pub total_versions_sampled: usize,
    pub total_versions_analyzed: usize,
    pub failed_fetches: usize,
    pub empty_documents: usize,
    pub skipped_versions: usize,
    pub total_unique_fields: usize,
    pub universal_fields_count: usize,
    pub partial_fields_count: usize,
    pub rare_fields_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldCoverageEntry {
    pub coverage_percent: f64,
    /// Every document carrying the field, untruncated.
    pub versions: Vec<String>,
}
