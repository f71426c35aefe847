//! Version manifest loading.

use std::io::ErrorKind;
use std::path::Path;

use schema_coverage::VersionEntry;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ManifestError, ManifestResult};

/// Pointers to the newest version of each main channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestVersions {
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub snapshot: Option<String>,
}

/// A manifest of versioned documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionManifest {
    #[serde(default)]
    pub latest: Option<LatestVersions>,

    /// Listed entries. A manifest without this field has no versions.
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
}

/// Read and parse the manifest at `path`.
///
/// A missing file is reported as [`ManifestError::NotFound`] so callers can
/// tell it apart from unreadable or malformed input.
pub async fn load_manifest(
    path: impl AsRef<Path>,
) -> ManifestResult<VersionManifest> {
    let path = path.as_ref();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ManifestError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let manifest: VersionManifest =
        serde_json::from_slice(&bytes).map_err(|source| {
            ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

    debug!(
        path = %path.display(),
        versions = manifest.versions.len(),
        "manifest loaded"
    );
    Ok(manifest)
}
