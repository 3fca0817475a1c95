mod config;
mod listener;
mod session;
mod words;

use std::path::PathBuf;

use clap::Parser;
use pages::ConfigMap;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::listener::{ListenError, Mode};
use crate::session::SessionOptions;
use crate::words::{WordStore, WordsError};

#[derive(Debug, thiserror::Error)]
enum SetupError {
    #[error(transparent)]
    Config(#[from] pages::ConfigError),
    #[error(transparent)]
    Words(#[from] WordsError),
    #[error(transparent)]
    Listen(#[from] ListenError),
}

#[derive(Parser, Debug)]
#[command(name = "wordpage-server", about = "Serve a word list in pages over TCP")]
struct Args {
    #[arg(long, env = "WORDPAGE_CONFIG", default_value = "config.json")]
    config: PathBuf,

    #[arg(long, help = "Word list file; overrides `filename` from the config")]
    words: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Serve a single connection, then exit")]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), SetupError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    run(args)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "wordpage-server failed"))
}

async fn run(args: Args) -> Result<(), SetupError> {
    let map = ConfigMap::load(&args.config)?;
    let config = ServerConfig::from_map(&map, args.words)?;

    let store = WordStore::load(&config.words_path)?;
    tracing::info!(words = store.len(), path = %config.words_path.display(), "word list loaded");

    let listener = listener::bind(&config.host, config.port).await?;
    tracing::info!(host = %config.host, port = config.port, "wordpage-server listening");

    let options = SessionOptions { read_timeout: config.read_timeout };
    let mode = if args.once { Mode::Once } else { Mode::Forever };

    tokio::select! {
        result = listener::run(listener, store, options, mode) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted, shutting down"),
    }
    tracing::info!("wordpage-server stopped");
    Ok(())
}
