/// Git-derived version, falling back to the package version.
pub const GIT_VERSION: &str = env!("GIT_VERSION");

/// Short commit hash, or `unknown` outside a checkout.
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Version string for `--version`.
pub const VERSION: &str = concat!(env!("GIT_VERSION"), " (", env!("GIT_HASH"), ")");

pub fn startup_banner() -> String {
    format!("schemascope {GIT_VERSION} ({GIT_HASH})")
}
