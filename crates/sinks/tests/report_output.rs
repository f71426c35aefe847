//! Console rendering and JSON report persistence.

use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use schema_coverage::{DocumentSchema, classify};
use serde_json::{Value, json};
use sinks::{AnalysisReport, JsonFileSink, ReportSink, render};

fn report_from(docs: &[(&str, Value)], sampled: usize) -> AnalysisReport {
    let schemas: IndexMap<String, DocumentSchema> = docs
        .iter()
        .map(|(k, v)| (k.to_string(), DocumentSchema::from_value(v)))
        .collect();
    let classification = classify(&schemas).expect("non-empty");

    let mut categories = IndexMap::new();
    categories.insert("release".to_string(), 5);
    categories.insert("snapshot".to_string(), 2);

    AnalysisReport {
        generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        versions_found: 7,
        categories,
        versions_sampled: sampled,
        failed_fetches: sampled - docs.len(),
        empty_documents: 0,
        skipped: 0,
        classification,
        schemas,
    }
}

fn two_doc_report() -> AnalysisReport {
    report_from(
        &[("r0", json!({"a": 1})), ("s1", json!({"a": 1, "b": "x"}))],
        5,
    )
}

/// Eight documents: `common` everywhere, `often` in 7, `seldom` in 2.
fn wide_report() -> AnalysisReport {
    let docs: Vec<(String, Value)> = (0..8)
        .map(|i| {
            let mut doc = json!({"common": true});
            if i != 3 {
                doc["often"] = json!(i);
            }
            if i < 2 {
                doc["seldom"] = json!("x");
            }
            (format!("v{i}"), doc)
        })
        .collect();
    let borrowed: Vec<(&str, Value)> =
        docs.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
    report_from(&borrowed, 8)
}

// ============================================================================
// Console
// ============================================================================

#[test]
fn console_lists_counts_and_buckets() {
    let text = render(&two_doc_report(), 5);

    assert!(text.contains("SCHEMA ANALYSIS RESULTS"));
    assert!(text.contains("Versions found: 7 (release: 5, snapshot: 2)"));
    assert!(text.contains("Versions sampled: 5"));
    assert!(text.contains("Versions analyzed: 2 (3 failed)"));
    assert!(text.contains("Total unique fields found: 2"));
    assert!(text.contains("   - Universal fields (100% coverage): 1"));
    assert!(text.contains("   - Partial fields (50-99% coverage): 1"));
    assert!(text.contains("   - Rare fields (<50% coverage): 0"));
    assert!(text.contains("UNIVERSAL FIELDS (present in all versions):\n   a (int)\n"));
    assert!(text.contains(
        "PARTIAL FIELDS (present in some versions):\n   b (str)\n      Coverage: 50.0% (1/2 versions)\n      Versions: s1\n"
    ));
    assert!(!text.contains("RARE FIELDS"));
}

#[test]
fn console_truncates_partial_but_not_rare() {
    let text = render(&wide_report(), 5);

    assert!(text.contains(
        "   often (int)\n      Coverage: 87.5% (7/8 versions)\n      Versions: v0, v1, v2, v4, v5... (+2 more)\n"
    ));
    assert!(text.contains(
        "   seldom (str)\n      Coverage: 25.0% (2/8 versions)\n      Versions: v0, v1\n"
    ));
}

#[test]
fn console_respects_preview_limit() {
    let text = render(&wide_report(), 2);
    assert!(text.contains("      Versions: v0, v1... (+5 more)\n"));
}

#[test]
fn universal_fields_are_sorted() {
    let report = report_from(&[("v", json!({"zeta": 1, "alpha": {"beta": []}}))], 1);
    let text = render(&report, 5);

    let alpha = text.find("   alpha (dict)").unwrap();
    let beta = text.find("   alpha.beta (list)").unwrap();
    let zeta = text.find("   zeta (int)").unwrap();
    assert!(alpha < beta && beta < zeta);
    assert!(text.contains("Versions analyzed: 1\n"));
}

#[test]
fn console_notes_entries_without_url() {
    let mut report = two_doc_report();
    report.failed_fetches = 2;
    report.skipped = 1;
    let text = render(&report, 5);
    assert!(text.contains("Versions analyzed: 2 (2 failed, 1 without url)\n"));
}

#[test]
fn console_notes_empty_documents() {
    let mut report = two_doc_report();
    report.failed_fetches = 1;
    report.empty_documents = 2;
    let text = render(&report, 5);
    assert!(text.contains("Versions analyzed: 2 (1 failed, 2 empty)\n"));
}

// ============================================================================
// JSON report
// ============================================================================

#[test]
fn json_report_shape() {
    let json = serde_json::to_value(two_doc_report().to_json_report()).unwrap();

    assert_eq!(json["generated_at"], "2024-05-01T12:00:00+00:00");
    assert_eq!(
        json["summary"],
        json!({
            "total_versions_found": 7,
            "total_versions_sampled": 5,
            "total_versions_analyzed": 2,
            "failed_fetches": 3,
            "empty_documents": 0,
            "skipped_versions": 0,
            "total_unique_fields": 2,
            "universal_fields_count": 1,
            "partial_fields_count": 1,
            "rare_fields_count": 0
        })
    );
    assert_eq!(json["universal_fields"], json!(["a (int)"]));
    assert_eq!(
        json["partial_fields"],
        json!({"b (str)": {"coverage_percent": 50.0, "versions": ["s1"]}})
    );
    assert_eq!(json["rare_fields"], json!({}));
    assert_eq!(
        json["version_schemas"],
        json!({"r0": ["a (int)"], "s1": ["a (int)", "b (str)"]})
    );
}

#[test]
fn json_report_keeps_full_version_lists() {
    let json = serde_json::to_value(wide_report().to_json_report()).unwrap();
    let versions = json["partial_fields"]["often (int)"]["versions"]
        .as_array()
        .unwrap();
    assert_eq!(versions.len(), 7);
    assert_eq!(json["rare_fields"]["seldom (str)"]["coverage_percent"], 25.0);
}

#[test]
fn json_report_lists_share_label_order() {
    let report = report_from(
        &[
            ("v1", json!({"a": 1, "a !": 1, "b": 1, "b !": 1})),
            ("v2", json!({"a": 1, "a !": 1})),
        ],
        2,
    );
    let json = serde_json::to_value(report.to_json_report()).unwrap();

    assert_eq!(json["universal_fields"], json!(["a ! (int)", "a (int)"]));
    let partial: Vec<&String> =
        json["partial_fields"].as_object().unwrap().keys().collect();
    assert_eq!(partial, vec!["b ! (int)", "b (int)"]);
    assert_eq!(json["version_schemas"]["v2"], json!(["a ! (int)", "a (int)"]));

    let text = render(&report, 5);
    let bang = text.find("   a ! (int)").unwrap();
    let plain = text.find("   a (int)").unwrap();
    assert!(bang < plain);
}

#[tokio::test]
async fn json_sink_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("schema_comparison_results.json");
    let sink = JsonFileSink::new(&path);

    sink.emit(&two_doc_report()).await.unwrap();

    let written: Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(written["summary"]["total_versions_analyzed"], 2);
    assert_eq!(written["universal_fields"], json!(["a (int)"]));
    assert!(!path.with_extension("tmp").exists());
    assert_eq!(sink.id(), "json-file");
}

#[tokio::test]
async fn json_sink_overwrites_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, "stale").unwrap();

    JsonFileSink::new(&path).emit(&two_doc_report()).await.unwrap();

    let written: Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(written["summary"]["partial_fields_count"], 1);
}
