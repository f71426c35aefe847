use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures loading the manifest. All of them abort the run.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error reading manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Failures fetching one document. The orchestrator absorbs these.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client setup failed: {details}")]
    Client { details: Cow<'static, str> },

    #[error("timeout fetching {url}")]
    Timeout { url: String },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("transport error fetching {url}: {details}")]
    Transport {
        url: String,
        details: Cow<'static, str>,
    },

    #[error("invalid JSON body from {url}: {details}")]
    Decode {
        url: String,
        details: Cow<'static, str>,
    },
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
