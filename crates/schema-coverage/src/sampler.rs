//! Category-stratified sampling of manifest entries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Groups with fewer entries than this are sampled whole.
const MIN_STRATIFIED_GROUP: usize = 3;

/// Category assigned to entries whose manifest record has no `type`.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// One versioned document listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub id: String,

    /// Category label, e.g. `release` or `snapshot`.
    #[serde(rename = "type", default = "unknown_category")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_time: Option<String>,
}

impl VersionEntry {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            url: Some(url.into()),
            time: None,
            release_time: None,
        }
    }
}

fn unknown_category() -> String {
    UNKNOWN_CATEGORY.to_string()
}

/// Pick a small, representative subset of `entries`.
///
/// Entries are grouped by category in first-seen order. Each group of three
/// or more contributes its first, middle (`len / 2`) and last entry; smaller
/// groups are taken whole.
pub fn sample(entries: &[VersionEntry]) -> Vec<VersionEntry> {
    let mut out = Vec::new();
    for group in group_by_kind(entries).into_values() {
        let n = group.len();
        if n >= MIN_STRATIFIED_GROUP {
            out.extend(
                [group[0], group[n / 2], group[n - 1]].into_iter().cloned(),
            );
        } else {
            out.extend(group.into_iter().cloned());
        }
    }
    out
}

/// Number of entries per category, in first-seen order.
pub fn group_counts(entries: &[VersionEntry]) -> IndexMap<String, usize> {
    group_by_kind(entries)
        .into_iter()
        .map(|(kind, group)| (kind.to_string(), group.len()))
        .collect()
}

fn group_by_kind(entries: &[VersionEntry]) -> IndexMap<&str, Vec<&VersionEntry>> {
    let mut groups: IndexMap<&str, Vec<&VersionEntry>> = IndexMap::new();
    for entry in entries {
        groups.entry(entry.kind.as_str()).or_default().push(entry);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(kind: &str, n: usize) -> Vec<VersionEntry> {
        (0..n)
            .map(|i| {
                VersionEntry::new(
                    format!("{kind}-{i}"),
                    kind,
                    format!("https://example.test/{kind}/{i}.json"),
                )
            })
            .collect()
    }

    fn ids(sampled: &[VersionEntry]) -> Vec<&str> {
        sampled.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_small_groups_taken_whole() {
        assert!(sample(&entries("release", 0)).is_empty());
        assert_eq!(ids(&sample(&entries("release", 1))), vec!["release-0"]);
        assert_eq!(
            ids(&sample(&entries("release", 2))),
            vec!["release-0", "release-1"]
        );
    }

    #[test]
    fn test_group_of_three_has_no_duplicates() {
        assert_eq!(
            ids(&sample(&entries("snapshot", 3))),
            vec!["snapshot-0", "snapshot-1", "snapshot-2"]
        );
    }

    #[test]
    fn test_group_of_ten_picks_first_middle_last() {
        assert_eq!(
            ids(&sample(&entries("release", 10))),
            vec!["release-0", "release-5", "release-9"]
        );
    }

    #[test]
    fn test_middle_never_collides_with_ends() {
        for n in 3..200 {
            let picked = sample(&entries("r", n));
            assert_eq!(picked.len(), 3);
            assert_ne!(picked[0].id, picked[1].id);
            assert_ne!(picked[1].id, picked[2].id);
        }
    }

    #[test]
    fn test_groups_emitted_in_first_seen_order() {
        let mut all = entries("snapshot", 1);
        all.extend(entries("release", 4));
        all.extend(entries("old_beta", 2));

        assert_eq!(
            ids(&sample(&all)),
            vec![
                "snapshot-0",
                "release-0",
                "release-2",
                "release-3",
                "old_beta-0",
                "old_beta-1",
            ]
        );
    }

    #[test]
    fn test_interleaved_categories_keep_relative_order() {
        let all = vec![
            VersionEntry::new("r1", "release", "u"),
            VersionEntry::new("s1", "snapshot", "u"),
            VersionEntry::new("r2", "release", "u"),
            VersionEntry::new("s2", "snapshot", "u"),
            VersionEntry::new("r3", "release", "u"),
        ];
        assert_eq!(ids(&sample(&all)), vec!["r1", "r2", "r3", "s1", "s2"]);
    }

    #[test]
    fn test_group_counts() {
        let mut all = entries("release", 5);
        all.extend(entries("snapshot", 2));

        let counts = group_counts(&all);
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![("release".to_string(), 5), ("snapshot".to_string(), 2)]
        );
    }

    #[test]
    fn test_entry_deserializes_manifest_record() {
        let raw = r#"{
            "id": "1.20.1",
            "type": "release",
            "url": "https://piston-meta.example/1.20.1.json",
            "time": "2023-06-12T13:25:51+00:00",
            "releaseTime": "2023-06-12T13:25:51+00:00",
            "sha1": "abc",
            "complianceLevel": 1
        }"#;
        let entry: VersionEntry = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.id, "1.20.1");
        assert_eq!(entry.kind, "release");
        assert_eq!(
            entry.release_time.as_deref(),
            Some("2023-06-12T13:25:51+00:00")
        );
    }

    #[test]
    fn test_entry_without_type_is_unknown() {
        let entry: VersionEntry =
            serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(entry.kind, UNKNOWN_CATEGORY);
        assert!(entry.url.is_none());
    }
}
