//! Word store — the immutable ordered list a server process pages over.
//!
//! DESIGN
//! ======
//! The list is loaded once at startup and shared read-only between sessions
//! through an `Arc<[String]>`. The sentinel is never stored: page encoding
//! appends it when a page reaches the end, so a word file containing the
//! literal sentinel is rejected up front.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pages::{MAX_WORD_LEN, PageRequest, SENTINEL, SEPARATOR};

#[derive(Debug, thiserror::Error)]
pub enum WordsError {
    #[error("failed to read word list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list contains the reserved sentinel token at position {index}")]
    ReservedWord { index: usize },
    #[error("word at position {index} is {len} bytes, longer than {}", MAX_WORD_LEN)]
    WordTooLong { index: usize, len: usize },
}

/// A page borrowed from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page<'a> {
    pub words: &'a [String],
    pub exhausted: bool,
}

impl Page<'_> {
    #[must_use]
    pub fn encode(&self) -> String {
        pages::encode_page(self.words, self.exhausted)
    }
}

#[derive(Clone, Debug)]
pub struct WordStore {
    words: Arc<[String]>,
}

impl WordStore {
    /// Load a comma-separated word file.
    ///
    /// # Errors
    ///
    /// [`WordsError::Read`] when the file cannot be read and
    /// [`WordsError::ReservedWord`] or [`WordsError::WordTooLong`] when a word is
    /// not servable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WordsError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Split every line on `,`, trim each entry, and skip empty ones.
    ///
    /// # Errors
    ///
    /// [`WordsError::ReservedWord`] when an entry equals the sentinel.
    pub fn parse(text: &str) -> Result<Self, WordsError> {
        let words = text
            .lines()
            .flat_map(|line| line.split(SEPARATOR))
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_owned)
            .collect();
        Self::from_words(words)
    }

    /// # Errors
    ///
    /// [`WordsError::ReservedWord`] when a word equals the sentinel and
    /// [`WordsError::WordTooLong`] when one exceeds [`MAX_WORD_LEN`] bytes.
    pub fn from_words(words: Vec<String>) -> Result<Self, WordsError> {
        for (index, word) in words.iter().enumerate() {
            if word == SENTINEL {
                return Err(WordsError::ReservedWord { index });
            }
            if word.len() > MAX_WORD_LEN {
                return Err(WordsError::WordTooLong { index, len: word.len() });
            }
        }
        Ok(Self { words: words.into() })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words `[offset, min(offset + count, n))`, empty when `offset >= n`.
    #[must_use]
    pub fn page(&self, request: PageRequest) -> Page<'_> {
        let window = request.window(self.words.len());
        Page {
            words: &self.words[window.start..window.end],
            exhausted: window.exhausted,
        }
    }
}

#[cfg(test)]
#[path = "words_test.rs"]
mod tests;
