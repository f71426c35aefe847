use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod fetch_cfg;

pub use fetch_cfg::{FetchConfig, ReportConfig};

pub const DEFAULT_MANIFEST_PATH: &str = "Fixtures/version_manifest.json";
pub const DEFAULT_OUTPUT_PATH: &str = "schema_comparison_results.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("expanding env vars in {path}: {details}")]
    EnvExpand { path: PathBuf, details: String },

    #[error("parsing yaml {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything a single analysis run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Manifest listing the versioned documents. Must exist.
    pub manifest_path: PathBuf,

    /// Where the structured JSON report is written.
    pub output_path: PathBuf,

    pub fetch: FetchConfig,

    pub report: ReportConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fetch: FetchConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fetch.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "fetch.batch_size must be at least 1".into(),
            ));
        }
        if self.fetch.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Load a run config from a YAML file, expanding `${VAR}` references.
pub fn load_from_path(file_path: impl AsRef<Path>) -> ConfigResult<RunConfig> {
    let path = file_path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let with_env = shellexpand::env(&raw).map_err(|e| ConfigError::EnvExpand {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    let cfg: RunConfig =
        serde_yaml::from_str(&with_env).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    cfg.validate()?;
    Ok(cfg)
}
