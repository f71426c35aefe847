//! Schema Coverage - structural schema diff across JSON documents.
//!
//! This crate turns parsed JSON documents into sets of typed field paths and
//! aggregates those sets to tell which fields every document carries and
//! which only some do.
//!
//! # Features
//!
//! - **Extraction**: Flattens nested JSON into `path (kind)` descriptors
//! - **Classification**: Buckets descriptors as universal, partial or rare
//! - **Sampling**: Picks first/middle/last entries per manifest category
//!
//! # Example
//!
//! ```ignore
//! use indexmap::IndexMap;
//! use schema_coverage::{DocumentSchema, classify};
//!
//! let mut schemas = IndexMap::new();
//! schemas.insert("1.0".to_string(), DocumentSchema::from_value(&json!({"a": 1})));
//! schemas.insert("1.1".to_string(), DocumentSchema::from_value(&json!({"a": 1, "b": "x"})));
//!
//! let result = classify(&schemas)?;
//! for field in &result.universal {
//!     println!("{field}");
//! }
//! ```

mod classify;
mod errors;
mod extract;
mod field;
mod sampler;

pub use classify::{Classification, CoverageBucket, FieldCoverage, classify};
pub use errors::{CoverageError, CoverageResult};
pub use extract::extract;
pub use field::{DocumentSchema, FieldDescriptor, JsonKind, is_blank_document};
pub use sampler::{UNKNOWN_CATEGORY, VersionEntry, group_counts, sample};
