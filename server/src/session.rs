//! Page session — one connection's sequential request/response loop.
//!
//! LIFECYCLE
//! =========
//! 1. Read one request line (at most `MAX_REQUEST_LEN` bytes)
//! 2. Parse `<offset>,<count>`; a malformed line ends the session with no reply
//! 3. Slice the page from the store and write it as one line
//! 4. Repeat until the peer closes, a read times out, or i/o fails
//!
//! The session holds nothing between requests; the store is the only state
//! and it is read-only, so concurrent sessions share it without locks.

use std::time::Duration;

use pages::{CodecError, LineReader, MAX_REQUEST_LEN, PageRequest};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::words::WordStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub read_timeout: Option<Duration>,
}

/// Why a session stopped.
#[derive(Debug)]
pub enum SessionEnd {
    /// The peer closed its side of the stream.
    Disconnected,
    /// A request could not be parsed; nothing was written for it.
    ProtocolViolation(CodecError),
    /// No request arrived within the read timeout.
    TimedOut(Duration),
    /// Reading or writing the stream failed.
    Io(std::io::Error),
}

impl From<CodecError> for SessionEnd {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(err) => Self::Io(err),
            CodecError::Timeout(limit) => Self::TimedOut(limit),
            other => Self::ProtocolViolation(other),
        }
    }
}

#[derive(Debug)]
pub struct SessionReport {
    pub pages_served: usize,
    pub end: SessionEnd,
}

/// Serve page requests on `stream` until the session ends.
pub async fn serve<S>(stream: S, store: &WordStore, options: SessionOptions) -> SessionReport
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = LineReader::new(stream, MAX_REQUEST_LEN).with_timeout(options.read_timeout);
    let mut pages_served = 0_usize;

    let end = loop {
        let line = match reader.read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break SessionEnd::Disconnected,
            Err(err) => break SessionEnd::from(err),
        };

        let request = match PageRequest::parse(&line.text) {
            Ok(request) => request,
            Err(err) => break SessionEnd::ProtocolViolation(err),
        };

        let page = store.page(request);
        debug!(
            offset = request.offset,
            count = request.count,
            words = page.words.len(),
            exhausted = page.exhausted,
            "session: serving page"
        );
        if let Err(err) = pages::write_line(reader.get_mut(), &page.encode()).await {
            break SessionEnd::from(err);
        }
        pages_served = pages_served.saturating_add(1);

        // An unterminated request is only returned once the peer has closed.
        if !line.terminated {
            break SessionEnd::Disconnected;
        }
    };

    SessionReport { pages_served, end }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
