//! Bounded, newline-delimited framing over any async byte stream.
//!
//! A single `read` may carry part of a line, exactly one line, or several
//! lines; the reader buffers until it sees a terminator and never holds more
//! than `limit` bytes.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{CodecError, TERMINATOR};

const READ_CHUNK: usize = 4096;

/// A line taken off the stream, without its terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// `false` when the peer closed the stream mid-line.
    pub terminated: bool,
}

pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    /// Prefix of `buf` already known to hold no terminator.
    scanned: usize,
    limit: usize,
    timeout: Option<Duration>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    #[must_use]
    pub fn new(inner: R, limit: usize) -> Self {
        Self { inner, buf: Vec::new(), scanned: 0, limit, timeout: None }
    }

    /// Bound every underlying read by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Read the next line.
    ///
    /// Returns `Ok(None)` once the stream is closed with nothing buffered. If
    /// the stream closes after a partial line, that line is returned with
    /// `terminated == false`.
    ///
    /// # Errors
    ///
    /// [`CodecError::LineTooLong`] when `limit` bytes arrive without a
    /// terminator, [`CodecError::Timeout`] when a read exceeds the deadline,
    /// [`CodecError::InvalidUtf8`] and [`CodecError::Io`] otherwise.
    pub async fn read_line(&mut self) -> Result<Option<Line>, CodecError> {
        let mut chunk = [0_u8; READ_CHUNK];
        loop {
            let found = self.buf[self.scanned..].iter().position(|&b| b == TERMINATOR as u8);
            if let Some(pos) = found.map(|at| self.scanned + at) {
                self.scanned = 0;
                let rest = self.buf.split_off(pos + 1);
                let mut raw = std::mem::replace(&mut self.buf, rest);
                raw.truncate(pos);
                return decode(raw, true).map(Some);
            }

            self.scanned = self.buf.len();

            if self.buf.len() >= self.limit {
                return Err(CodecError::LineTooLong { limit: self.limit });
            }

            let want = (self.limit - self.buf.len()).min(READ_CHUNK);
            let read = self.fill(&mut chunk[..want]).await?;
            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                self.scanned = 0;
                let raw = std::mem::take(&mut self.buf);
                return decode(raw, false).map(Some);
            }
            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    async fn fill(&mut self, chunk: &mut [u8]) -> Result<usize, CodecError> {
        let Some(limit) = self.timeout else {
            return Ok(self.inner.read(chunk).await?);
        };

        tokio::time::timeout(limit, self.inner.read(chunk))
            .await
            .map_err(|_| CodecError::Timeout(limit))?
            .map_err(CodecError::from)
    }
}

fn decode(raw: Vec<u8>, terminated: bool) -> Result<Line, CodecError> {
    let text = String::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)?;
    Ok(Line { text, terminated })
}

/// Write one already-terminated line and flush it.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the write or flush fails.
pub async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<(), CodecError> {
    debug_assert!(line.ends_with(TERMINATOR), "unterminated line: {line:?}");
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
#[path = "line_test.rs"]
mod tests;
