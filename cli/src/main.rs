mod config;
mod fetch;
mod freq;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use pages::{ConfigError, ConfigMap};
use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;
use crate::fetch::{FetchError, FetchPlan};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "wordpage-client", about = "Fetch a paged word list and count word frequencies")]
struct Cli {
    #[arg(long, env = "WORDPAGE_CONFIG", default_value = "config.json")]
    config: PathBuf,

    #[arg(long, help = "Words per page; overrides `k` from the config")]
    k: Option<usize>,

    #[arg(long, help = "Start offset; overrides `p` from the config")]
    p: Option<usize>,

    #[arg(long, default_value_t = false, help = "Skip the frequency report")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // stdout carries the timing line and the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "wordpage-client failed"))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let plan = FetchPlan {
        start_offset: config.start_offset,
        page_size: config.page_size,
        timeout: config.timeout,
    };
    tracing::info!(
        host = %config.host,
        port = config.port,
        k = plan.page_size,
        p = plan.start_offset,
        "fetching word list"
    );

    let outcome = fetch::fetch(&config.host, config.port, plan).await?;
    let elapsed_ms = outcome.elapsed.as_secs_f64() * 1000.0;
    tracing::info!(
        pages = outcome.pages,
        distinct = outcome.table.len(),
        words = outcome.table.total(),
        elapsed_ms,
        "fetch complete"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "ELAPSED_MS:{elapsed_ms:.3}")?;
    if !config.quiet {
        outcome.table.report(&mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut map = ConfigMap::load(&cli.config)?;
    if let Some(k) = cli.k {
        map.set("k", k.to_string());
    }
    if let Some(p) = cli.p {
        map.set("p", p.to_string());
    }
    if cli.quiet {
        map.set("quiet", "true");
    }
    ClientConfig::from_map(&map)
}
