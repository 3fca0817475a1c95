//! Shared page model and text codec for the word paging protocol.
//!
//! This crate owns the wire representation used by both `server` and `cli`.
//! Every message is a single ASCII line: requests are `<offset>,<count>\n`,
//! responses are the page's words joined with `,` and terminated by `\n`.
//! The last page of the list carries the [`SENTINEL`] as its final token.

mod config;
mod line;

pub use config::{ConfigError, ConfigMap};
pub use line::{Line, LineReader, write_line};

use std::time::Duration;

/// Token marking the end of the servable sequence. Never a word.
pub const SENTINEL: &str = "EOF";

/// Separator between the fields of a request and the words of a page.
pub const SEPARATOR: char = ',';

/// Line terminator for every message on the wire.
pub const TERMINATOR: char = '\n';

/// Upper bound on a single request line, terminator included.
pub const MAX_REQUEST_LEN: usize = 1024;

/// Smallest response limit a reader is given, terminator included.
pub const MAX_RESPONSE_LEN: usize = 1 << 20;

/// Longest word a server will hold, in bytes.
pub const MAX_WORD_LEN: usize = 1024;

/// Error returned while framing or decoding protocol lines.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The underlying stream failed.
    #[error("stream i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// No bytes arrived before the read deadline.
    #[error("timed out after {0:?} waiting for data")]
    Timeout(Duration),
    /// The peer sent more than `limit` bytes without a line terminator.
    #[error("line exceeds {limit} bytes without a terminator")]
    LineTooLong { limit: usize },
    /// The line is not valid UTF-8.
    #[error("line is not valid utf-8")]
    InvalidUtf8,
    /// A request line without the `,` between offset and count.
    #[error("request has no separator: {0:?}")]
    MissingSeparator(String),
    /// A request field is not a non-negative decimal integer.
    #[error("invalid {field} in request: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    /// A request asked for zero words.
    #[error("request count must be positive")]
    ZeroCount,
    /// The sentinel appeared somewhere other than the last token of a page.
    #[error("sentinel found before the end of a page")]
    MisplacedSentinel,
}

/// "Give me up to `count` words starting at index `offset`."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub count: usize,
}

/// Index range a request covers within a list of `len` words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    /// No words exist at or beyond `end`.
    pub exhausted: bool,
}

impl PageRequest {
    #[must_use]
    pub fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    /// Encode as a terminated request line.
    #[must_use]
    pub fn encode(self) -> String {
        format!("{}{SEPARATOR}{}{TERMINATOR}", self.offset, self.count)
    }

    /// Parse a request line. A trailing terminator is optional.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingSeparator`] when there is no `,`,
    /// [`CodecError::InvalidNumber`] when either field is not a decimal
    /// integer, and [`CodecError::ZeroCount`] for a zero count.
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let text = text.strip_suffix(TERMINATOR).unwrap_or(text);
        let Some((offset, count)) = text.split_once(SEPARATOR) else {
            return Err(CodecError::MissingSeparator(text.to_owned()));
        };

        let offset = parse_field("offset", offset)?;
        let count = parse_field("count", count)?;
        if count == 0 {
            return Err(CodecError::ZeroCount);
        }
        Ok(Self { offset, count })
    }

    /// Clamp this request against a list of `len` words.
    #[must_use]
    pub fn window(self, len: usize) -> PageWindow {
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.count).min(len);
        PageWindow { start, end, exhausted: end >= len }
    }

    /// Longest response line this request can legitimately produce.
    ///
    /// `count` words of up to [`MAX_WORD_LEN`] bytes, their separators and a
    /// trailing sentinel, never below [`MAX_RESPONSE_LEN`]. Saturates instead
    /// of overflowing.
    #[must_use]
    pub fn response_limit(self) -> usize {
        self.count
            .saturating_mul(MAX_WORD_LEN + 1)
            .saturating_add(SENTINEL.len() + 1)
            .max(MAX_RESPONSE_LEN)
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<usize, CodecError> {
    let digits = raw.trim();
    let invalid = || CodecError::InvalidNumber { field, value: raw.to_owned() };

    // `usize::from_str` also takes a leading `+`
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse::<usize>().map_err(|_| invalid())
}

/// One decoded page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageResponse {
    pub words: Vec<String>,
    /// The sentinel closed this page; nothing follows it.
    pub exhausted: bool,
}

impl PageResponse {
    /// Encode as a terminated response line.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_page(&self.words, self.exhausted)
    }

    /// Decode a response line. A trailing terminator is optional; empty
    /// tokens are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MisplacedSentinel`] when the sentinel appears
    /// anywhere but the last token.
    pub fn decode(line: &str) -> Result<Self, CodecError> {
        let line = line.strip_suffix(TERMINATOR).unwrap_or(line);
        let mut tokens: Vec<&str> = line.split(SEPARATOR).collect();

        let exhausted = tokens.last() == Some(&SENTINEL);
        if exhausted {
            tokens.pop();
        }
        if tokens.contains(&SENTINEL) {
            return Err(CodecError::MisplacedSentinel);
        }

        let words = tokens
            .into_iter()
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(Self { words, exhausted })
    }
}

/// Build a response line from borrowed words.
///
/// Tokens are collected first and joined once, so an empty exhausted page
/// is `EOF\n` and no page is ever written as zero bytes.
#[must_use]
pub fn encode_page<S: AsRef<str>>(words: &[S], exhausted: bool) -> String {
    let mut tokens: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    if exhausted {
        tokens.push(SENTINEL);
    }

    let mut line = tokens.join(",");
    line.push(TERMINATOR);
    line
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
