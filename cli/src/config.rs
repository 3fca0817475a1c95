//! Typed client configuration, built once from the shared config map.

use std::time::Duration;

use pages::{ConfigError, ConfigMap};

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_START_OFFSET: usize = 0;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Words requested per page (`k`).
    pub page_size: usize,
    /// Offset of the first request (`p`).
    pub start_offset: usize,
    pub quiet: bool,
    /// Deadline for connect and for each response. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Build typed client config from the config map.
    ///
    /// Required: `server_ip`, `server_port`.
    ///
    /// Optional:
    /// - `k`: page size, default 5, must be positive
    /// - `p`: start offset, default 0
    /// - `quiet`: `true` suppresses the frequency report
    /// - `read_timeout_secs`: default 10, `0` disables the limit
    pub fn from_map(map: &ConfigMap) -> Result<Self, ConfigError> {
        let host = map.require("server_ip")?.trim().to_owned();
        let port = map.parse::<u16>("server_port")?;

        let page_size = map.parse_or("k", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue { key: "k".into(), value: "0".into() });
        }
        let start_offset = map.parse_or("p", DEFAULT_START_OFFSET)?;
        let quiet = map.parse_or("quiet", false)?;
        let timeout_secs = map.parse_or("read_timeout_secs", DEFAULT_READ_TIMEOUT_SECS)?;

        Ok(Self {
            host,
            port,
            page_size,
            start_offset,
            quiet,
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
