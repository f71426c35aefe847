use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use runner::{RunOutcome, run, version};
use schemascope_config::{RunConfig, load_from_path};
use sinks::build_sinks;
use sources::HttpFetcher;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "schemascope",
    version = version::VERSION,
    about = "Compare the structure of versioned JSON documents"
)]
struct Args {
    /// YAML run config; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    manifest: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let o11y_cfg = o11y::O11yConfig {
        logging: o11y::logging::Config {
            level: args.log_level.clone(),
            json: args.json_logs,
            with_targets: false,
        },
        install_panic_hook: true,
    };
    if let Err(e) = o11y::init_all(&o11y_cfg) {
        eprintln!("logging setup failed: {e}");
    }
    info!("{}", version::startup_banner());

    let cfg = load_run_config(&args)?;
    let fetcher = HttpFetcher::new(&cfg.fetch).context("build http client")?;
    let sinks = build_sinks(&cfg);

    match run(&cfg, &fetcher, &sinks).await.context("schema analysis")? {
        RunOutcome::Completed(report) => {
            info!(
                analyzed = report.versions_analyzed(),
                fields = report.classification.unique_fields(),
                "analysis complete"
            );
        }
        RunOutcome::NothingAnalyzed {
            sampled,
            failed,
            empty,
            skipped,
        } => {
            println!(
                "No versions could be analyzed: {sampled} sampled, {failed} failed to fetch, \
                 {empty} empty, {skipped} without url. No report written."
            );
        }
    }

    Ok(())
}

fn load_run_config(args: &Args) -> Result<RunConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_from_path(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(manifest) = &args.manifest {
        cfg.manifest_path = manifest.clone();
    }
    if let Some(output) = &args.output {
        cfg.output_path = output.clone();
    }
    debug!(config = ?cfg, "run config");
    Ok(cfg)
}
