//! Human-readable report on stdout.

use std::fmt;
use std::io::Write as _;

use async_trait::async_trait;
use schema_coverage::FieldCoverage;

use crate::errors::SinkResult;
use crate::report::AnalysisReport;
use crate::ReportSink;

const RULE_WIDTH: usize = 80;

pub struct ConsoleSink {
    id: String,
    preview_limit: usize,
}

impl ConsoleSink {
    pub fn new(preview_limit: usize) -> Self {
        Self {
            id: "console".to_string(),
            preview_limit,
        }
    }
}

#[async_trait]
impl ReportSink for ConsoleSink {
    fn id(&self) -> &str {
        &self.id
    }

    async fn emit(&self, report: &AnalysisReport) -> SinkResult<()> {
        let text = render(report, self.preview_limit);
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Render the report as text.
///
/// Partial fields list at most `preview_limit` document keys followed by an
/// overflow count; rare fields always list every key.
pub fn render(report: &AnalysisReport, preview_limit: usize) -> String {
    ConsoleReport {
        report,
        preview_limit,
    }
    .to_string()
}

struct ConsoleReport<'a> {
    report: &'a AnalysisReport,
    preview_limit: usize,
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let c = &report.classification;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "\n{rule}\nSCHEMA ANALYSIS RESULTS\n{rule}\n")?;

        let categories = report
            .categories
            .iter()
            .map(|(kind, n)| format!("{kind}: {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Versions found: {} ({categories})", report.versions_found)?;
        writeln!(f, "Versions sampled: {}", report.versions_sampled)?;
        write!(f, "Versions analyzed: {}", report.versions_analyzed())?;
        let notes = run_notes(report);
        if !notes.is_empty() {
            write!(f, " ({})", notes.join(", "))?;
        }
        writeln!(f)?;

        writeln!(f, "\nTotal unique fields found: {}", c.unique_fields())?;
        writeln!(f, "   - Universal fields (100% coverage): {}", c.universal.len())?;
        writeln!(f, "   - Partial fields (50-99% coverage): {}", c.partial.len())?;
        writeln!(f, "   - Rare fields (<50% coverage): {}", c.rare.len())?;

        writeln!(f, "\nUNIVERSAL FIELDS (present in all versions):")?;
        for field in &c.universal {
            writeln!(f, "   {field}")?;
        }

        if !c.partial.is_empty() {
            writeln!(f, "\nPARTIAL FIELDS (present in some versions):")?;
            for cov in &c.partial {
                write_coverage(f, cov, c.total_documents)?;
                writeln!(
                    f,
                    "      Versions: {}",
                    preview(&cov.documents, self.preview_limit)
                )?;
            }
        }

        if !c.rare.is_empty() {
            writeln!(f, "\nRARE FIELDS (present in few versions):")?;
            for cov in &c.rare {
                write_coverage(f, cov, c.total_documents)?;
                writeln!(f, "      Versions: {}", cov.documents.join(", "))?;
            }
        }

        Ok(())
    }
}

/// Why sampled versions are missing from the analysis.
fn run_notes(report: &AnalysisReport) -> Vec<String> {
    let mut notes = Vec::new();
    if report.failed_fetches > 0 {
        notes.push(format!("{} failed", report.failed_fetches));
    }
    if report.empty_documents > 0 {
        notes.push(format!("{} empty", report.empty_documents));
    }
    if report.skipped > 0 {
        notes.push(format!("{} without url", report.skipped));
    }
    notes
}

fn write_coverage(
    f: &mut fmt::Formatter<'_>,
    cov: &FieldCoverage,
    total: usize,
) -> fmt::Result {
    writeln!(f, "   {}", cov.field)?;
    writeln!(
        f,
        "      Coverage: {:.1}% ({}/{} versions)",
        cov.coverage_percent(),
        cov.documents.len(),
        total
    )
}

fn preview(keys: &[String], limit: usize) -> String {
    let shown = keys[..keys.len().min(limit)].join(", ");
    if keys.len() > limit {
        format!("{shown}... (+{} more)", keys.len() - limit)
    } else {
        shown
    }
}
