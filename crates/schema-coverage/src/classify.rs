use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::{CoverageError, CoverageResult};
use crate::field::{DocumentSchema, FieldDescriptor};

/// Coverage class of a field descriptor across the analyzed documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBucket {
    /// Present in every document.
    Universal,
    /// Present in at least half, but not all, documents.
    Partial,
    /// Present in fewer than half of the documents.
    Rare,
}

impl CoverageBucket {
    /// Bucket for a field seen in `count` of `total` documents.
    ///
    /// Decided on integers so that exactly half lands in `Partial`.
    pub fn classify(count: usize, total: usize) -> Self {
        if count == total {
            Self::Universal
        } else if count * 2 >= total {
            Self::Partial
        } else {
            Self::Rare
        }
    }
}

/// A non-universal field and the documents that carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCoverage {
    pub field: FieldDescriptor,
    /// Document keys in input order. Never truncated.
    pub documents: Vec<String>,
    /// `documents.len() / total_documents`
    pub ratio: f64,
}

impl FieldCoverage {
    pub fn coverage_percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// Result of classifying a set of document schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub total_documents: usize,
    pub universal: BTreeSet<FieldDescriptor>,
    /// Ordered by descriptor.
    pub partial: Vec<FieldCoverage>,
    /// Ordered by descriptor.
    pub rare: Vec<FieldCoverage>,
}

impl Classification {
    /// Number of distinct descriptors across all buckets.
    pub fn unique_fields(&self) -> usize {
        self.universal.len() + self.partial.len() + self.rare.len()
    }

    /// Which bucket a descriptor landed in, if it was observed at all.
    pub fn bucket_of(&self, field: &FieldDescriptor) -> Option<CoverageBucket> {
        if self.universal.contains(field) {
            return Some(CoverageBucket::Universal);
        }
        if self.partial.iter().any(|c| &c.field == field) {
            return Some(CoverageBucket::Partial);
        }
        if self.rare.iter().any(|c| &c.field == field) {
            return Some(CoverageBucket::Rare);
        }
        None
    }
}

/// Classify every observed field descriptor by how many documents carry it.
///
/// Document key lists follow the iteration order of `schemas`. Fails with
/// [`CoverageError::EmptyInput`] when there is nothing to divide by.
pub fn classify(
    schemas: &IndexMap<String, DocumentSchema>,
) -> CoverageResult<Classification> {
    let total = schemas.len();
    if total == 0 {
        return Err(CoverageError::EmptyInput);
    }

    // BTreeMap keeps the universe sorted, so bucket lists come out ordered.
    let mut coverage: BTreeMap<&FieldDescriptor, Vec<String>> = BTreeMap::new();
    for (key, schema) in schemas {
        for field in schema.iter() {
            coverage.entry(field).or_default().push(key.clone());
        }
    }

    let mut universal = BTreeSet::new();
    let mut partial = Vec::new();
    let mut rare = Vec::new();

    for (field, documents) in coverage {
        let count = documents.len();
        match CoverageBucket::classify(count, total) {
            CoverageBucket::Universal => {
                universal.insert(field.clone());
            }
            bucket => {
                let entry = FieldCoverage {
                    field: field.clone(),
                    ratio: count as f64 / total as f64,
                    documents,
                };
                if bucket == CoverageBucket::Partial {
                    partial.push(entry);
                } else {
                    rare.push(entry);
                }
            }
        }
    }

    debug!(
        documents = total,
        universal = universal.len(),
        partial = partial.len(),
        rare = rare.len(),
        "coverage classified"
    );

    Ok(Classification {
        total_documents: total,
        universal,
        partial,
        rare,
    })
}
