//! Fetch and report configuration.
//!
//! Defaults reproduce the fixed constants of a plain `schemascope`
//! invocation: batches of 10, a one second pause between batches and a
//! 30 second per-request timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How sampled documents are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Number of requests issued concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between consecutive batches (ms). Not applied after the last one.
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,

    /// Per-request timeout (seconds), covering connect through body read.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Which reports are produced and how they are shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Document keys shown per partial field on the console before the
    /// `(+N more)` suffix. The JSON report always lists every key.
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Print the human-readable report to stdout.
    #[serde(default = "default_true")]
    pub console: bool,

    /// Write the structured JSON report to `output_path`.
    #[serde(default = "default_true")]
    pub json_file: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_limit: default_preview_limit(),
            console: true,
            json_file: true,
        }
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_pause_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("schemascope/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_preview_limit() -> usize {
    5
}
