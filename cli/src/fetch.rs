//! Page walker — fetches the whole list one page at a time.
//!
//! DESIGN
//! ======
//! One connection, one request in flight. The cursor starts at the configured
//! offset and advances by the page size after every page that does not carry
//! the sentinel. Termination depends only on the sentinel: a stream that
//! closes first, or any undecodable line, ends the fetch with an error
//! instead of another round trip.

use std::time::{Duration, Instant};

use pages::{CodecError, LineReader, PageRequest, PageResponse};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::{debug, info, trace};

use crate::freq::FrequencyTable;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("protocol violation: {0}")]
    Protocol(CodecError),
    #[error("server closed the connection before the end of the list")]
    Closed,
    #[error("page offset overflowed after {pages} pages")]
    OffsetOverflow { pages: usize },
    #[error("connection failed: {0}")]
    Io(std::io::Error),
}

impl From<CodecError> for FetchError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(err) => Self::Io(err),
            CodecError::Timeout(limit) => Self::Timeout(limit),
            other => Self::Protocol(other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchPlan {
    pub start_offset: usize,
    pub page_size: usize,
    pub timeout: Option<Duration>,
}

/// What a walk over an established stream produced.
#[derive(Debug)]
pub struct Walk {
    pub table: FrequencyTable,
    /// Responses received, the sentinel page included.
    pub pages: usize,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub table: FrequencyTable,
    pub pages: usize,
    /// Connect through sentinel.
    pub elapsed: Duration,
}

/// Connect to `host:port` and walk the list to the sentinel.
pub async fn fetch(host: &str, port: u16, plan: FetchPlan) -> Result<FetchOutcome, FetchError> {
    let started = Instant::now();
    let stream = connect(host, port, plan.timeout).await?;
    info!(%host, port, "fetch: connected");

    let Walk { table, pages } = walk(stream, plan).await?;
    Ok(FetchOutcome { table, pages, elapsed: started.elapsed() })
}

async fn connect(host: &str, port: u16, timeout: Option<Duration>) -> Result<TcpStream, FetchError> {
    let connecting = TcpStream::connect((host, port));
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, connecting)
            .await
            .map_err(|_| FetchError::Timeout(limit))?,
        None => connecting.await,
    };

    let stream = result.map_err(|source| FetchError::Connect {
        host: host.to_owned(),
        port,
        source,
    })?;
    if let Err(err) = stream.set_nodelay(true) {
        debug!(error = %err, "fetch: set_nodelay failed");
    }
    Ok(stream)
}

/// Walk pages over an established stream.
///
/// Every request asks for the same count, so one response limit fits them all.
pub async fn walk<S>(stream: S, plan: FetchPlan) -> Result<Walk, FetchError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let limit = PageRequest::new(plan.start_offset, plan.page_size).response_limit();
    let mut reader = LineReader::new(stream, limit).with_timeout(plan.timeout);
    let mut table = FrequencyTable::new();
    let mut offset = plan.start_offset;
    let mut pages = 0_usize;

    loop {
        let request = PageRequest::new(offset, plan.page_size);
        pages::write_line(reader.get_mut(), &request.encode()).await?;

        let Some(line) = reader.read_line().await? else {
            return Err(FetchError::Closed);
        };
        if !line.terminated {
            return Err(FetchError::Closed);
        }

        let page = PageResponse::decode(&line.text)?;
        pages = pages.saturating_add(1);
        trace!(offset, words = page.words.len(), exhausted = page.exhausted, "fetch: page received");

        for word in &page.words {
            table.record(word);
        }
        if page.exhausted {
            break;
        }

        offset = offset
            .checked_add(plan.page_size)
            .ok_or(FetchError::OffsetOverflow { pages })?;
    }

    Ok(Walk { table, pages })
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
