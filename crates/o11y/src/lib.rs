pub mod logging;
pub mod panic;

use std::future::Future;
use std::time::Instant;

/// Top-level config for observability.
#[derive(Clone, Debug)]
pub struct O11yConfig {
    pub logging: logging::Config,
    pub install_panic_hook: bool,
}

impl Default for O11yConfig {
    fn default() -> Self {
        Self {
            logging: logging::Config::default(),
            install_panic_hook: true,
        }
    }
}

pub fn init_all(cfg: &O11yConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&cfg.logging)?;
    if cfg.install_panic_hook {
        panic::install_hook();
    }
    Ok(())
}

/// Wrap a future to log its duration at debug level.
pub async fn timed<F, T>(label: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let dur = start.elapsed();
    tracing::debug!(%label, ms = dur.as_millis() as u64, "timed.future.complete");
    out
}
