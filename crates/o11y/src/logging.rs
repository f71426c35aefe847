use std::io::IsTerminal;
use std::sync::Once;

use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

static INIT: Once = Once::new();

const FALLBACK_DIRECTIVE: &str = "info";

#[derive(Clone, Debug)]
pub struct Config {
    /// A bare level ("debug") or a full filter such as
    /// "info,sources=debug,reqwest=warn". `RUST_LOG` wins when set.
    pub level: Option<String>,
    /// JSON lines instead of human-readable text.
    pub json: bool,
    pub with_targets: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Some(FALLBACK_DIRECTIVE.to_owned()),
            json: false,
            with_targets: false,
        }
    }
}

/// Pick the filter directive: a non-empty `RUST_LOG`, then the configured
/// level, then `info`.
fn filter_directive(cfg: &Config, rust_log: Option<String>) -> String {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .or_else(|| cfg.level.clone())
        .unwrap_or_else(|| FALLBACK_DIRECTIVE.to_owned())
}

/// Install the global subscriber, writing to stderr so stdout stays free for
/// the report. Only the first call has any effect.
pub fn init(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut result = Ok(());
    INIT.call_once(|| {
        let _ = LogTracer::init();

        let directive = filter_directive(cfg, std::env::var("RUST_LOG").ok());
        let filter = EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE));

        let layer = fmt::layer()
            .with_target(cfg.with_targets)
            .with_writer(std::io::stderr);
        let layer = if cfg.json {
            layer.json().with_current_span(true).boxed()
        } else {
            layer.with_ansi(std::io::stderr().is_terminal()).boxed()
        };

        let subscriber = Registry::default().with(filter).with(layer);
        result = tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| format!("tracing subscriber already set: {e}"));
    });
    result.map_err(Into::into)
}
