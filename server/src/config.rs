//! Typed server configuration, built once from the shared config map.

use std::path::PathBuf;
use std::time::Duration;

use pages::{ConfigError, ConfigMap};

pub const DEFAULT_WORDS_FILE: &str = "words.txt";
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub words_path: PathBuf,
    /// Idle limit between requests on one session. `None` waits forever.
    pub read_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Build typed server config from the config map.
    ///
    /// Required: `server_ip`, `server_port`.
    ///
    /// Optional:
    /// - `filename`: word list path, default `words.txt`; `words` wins when set
    /// - `read_timeout_secs`: default 30, `0` disables the limit
    pub fn from_map(map: &ConfigMap, words: Option<PathBuf>) -> Result<Self, ConfigError> {
        let host = map.require("server_ip")?.trim().to_owned();
        let port = map.parse::<u16>("server_port")?;
        let words_path =
            words.unwrap_or_else(|| PathBuf::from(map.get("filename").unwrap_or(DEFAULT_WORDS_FILE)));
        let timeout_secs = map.parse_or("read_timeout_secs", DEFAULT_READ_TIMEOUT_SECS)?;

        Ok(Self {
            host,
            port,
            words_path,
            read_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
