//! TCP accept loop.
//!
//! DESIGN
//! ======
//! `Mode::Once` accepts a single connection and serves it to completion on
//! the calling task. `Mode::Forever` spawns one task per accepted connection;
//! each task owns its session and only shares the read-only word store.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::session::{self, SessionEnd, SessionOptions};
use crate::words::WordStore;

#[derive(Debug, thiserror::Error)]
pub enum ListenError {
    #[error("failed to bind {host}:{port}: {source}")]
    Bind {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Once,
    Forever,
}

pub async fn bind(host: &str, port: u16) -> Result<TcpListener, ListenError> {
    TcpListener::bind((host, port)).await.map_err(|source| ListenError::Bind {
        host: host.to_owned(),
        port,
        source,
    })
}

/// Accept and serve connections according to `mode`.
pub async fn run(
    listener: TcpListener,
    store: WordStore,
    options: SessionOptions,
    mode: Mode,
) -> Result<(), ListenError> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) if mode == Mode::Forever => {
                warn!(error = %err, "listener: accept failed");
                continue;
            }
            Err(err) => return Err(ListenError::Accept(err)),
        };

        match mode {
            Mode::Once => {
                handle_connection(stream, peer, &store, options).await;
                return Ok(());
            }
            Mode::Forever => {
                let store = store.clone();
                tokio::spawn(async move {
                    handle_connection(stream, peer, &store, options).await;
                });
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, store: &WordStore, options: SessionOptions) {
    if let Err(err) = stream.set_nodelay(true) {
        debug!(%peer, error = %err, "listener: set_nodelay failed");
    }
    info!(%peer, "session: client connected");

    let report = session::serve(stream, store, options).await;
    let pages = report.pages_served;
    match report.end {
        SessionEnd::Disconnected => info!(%peer, pages, "session: client disconnected"),
        SessionEnd::ProtocolViolation(err) => {
            warn!(%peer, pages, error = %err, "session: protocol violation, closing");
        }
        SessionEnd::TimedOut(limit) => {
            warn!(%peer, pages, timeout = ?limit, "session: idle timeout, closing");
        }
        SessionEnd::Io(err) => info!(%peer, pages, error = %err, "session: connection lost"),
    }
}

#[cfg(test)]
#[path = "listener_test.rs"]
mod tests;
