use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::errors::SinkResult;
use crate::report::AnalysisReport;
use crate::ReportSink;

/// Writes the structured report as pretty-printed JSON.
///
/// The file is written to a sibling `.tmp` path and renamed into place, so
/// readers never observe a half-written report.
pub struct JsonFileSink {
    id: String,
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            id: "json-file".to_string(),
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportSink for JsonFileSink {
    fn id(&self) -> &str {
        &self.id
    }

    async fn emit(&self, report: &AnalysisReport) -> SinkResult<()> {
        let bytes = serde_json::to_vec_pretty(&report.to_json_report())?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        info!(path = %self.path.display(), bytes = bytes.len(), "report written");
        Ok(())
    }
}
