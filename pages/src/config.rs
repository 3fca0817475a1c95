//! Flat string-to-string configuration read from a JSON object file.
//!
//! Both binaries read the same `config.json`. Scalar values are flattened to
//! strings so `"server_port": 5000` and `"server_port": "5000"` behave the
//! same; nested values are ignored. Typed config structs live next to the
//! binaries that use them and are built from this map once at startup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde::de::IgnoredAny;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing required config key `{0}`")]
    MissingKey(String),
    #[error("invalid value for config key `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(number) => Some(number.to_string()),
            Self::Flag(flag) => Some(flag.to_string()),
            Self::Other(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigMap {
    entries: BTreeMap<String, String>,
}

impl ConfigMap {
    /// Read and flatten a JSON object file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] when the file cannot be opened and
    /// [`ConfigError::Parse`] when it is not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Flatten a JSON object held in memory.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when `text` is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, Scalar> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .filter_map(|(key, value)| value.into_text().map(|text| (key, text)))
            .collect();
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Override or add a value, e.g. from a command-line flag.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// # Errors
    ///
    /// [`ConfigError::MissingKey`] when `key` is absent.
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey(key.to_owned()))
    }

    /// Parse a required value.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingKey`] or [`ConfigError::InvalidValue`].
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.require(key)?;
        parse_value(key, value)
    }

    /// Parse an optional value, falling back to `default` when absent.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when the value is present but malformed.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(value) => parse_value(key, value),
            None => Ok(default),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
