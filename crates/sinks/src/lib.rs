//! Report sinks for schemascope.
//!
//! # Available Sinks
//!
//! - **Console**: human-readable summary on stdout
//! - **JSON file**: the structured report consumed by downstream tooling
//!
//! # Example
//!
//! ```ignore
//! use sinks::build_sinks;
//!
//! let sinks = build_sinks(&run_config);
//! for sink in &sinks {
//!     sink.emit(&report).await?;
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use schemascope_config::RunConfig;

pub mod console;
mod errors;
pub mod json_file;
pub mod report;

pub use console::{ConsoleSink, render};
pub use errors::{SinkError, SinkResult};
pub use json_file::JsonFileSink;
pub use report::{AnalysisReport, FieldCoverageEntry, JsonReport, Summary};

/// Consumes a finished analysis.
#[async_trait]
pub trait ReportSink: Send + Sync {
    fn id(&self) -> &str;

    async fn emit(&self, report: &AnalysisReport) -> SinkResult<()>;
}

pub type ArcDynReportSink = Arc<dyn ReportSink>;

/// Build the sinks enabled in `cfg.report`, console first.
pub fn build_sinks(cfg: &RunConfig) -> Vec<ArcDynReportSink> {
    let mut sinks: Vec<ArcDynReportSink> = Vec::new();
    if cfg.report.console {
        sinks.push(Arc::new(ConsoleSink::new(cfg.report.preview_limit)));
    }
    if cfg.report.json_file {
        sinks.push(Arc::new(JsonFileSink::new(&cfg.output_path)));
    }
    sinks
}
