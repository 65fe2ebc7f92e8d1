//! HTTP server configuration from TOML (`[server]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address for `--serve`.
    pub bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:9002".to_string(),
        }
    }
}

impl FileServerConfig {
    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        match self.bind.parse::<SocketAddr>() {
            Ok(_) => Vec::new(),
            Err(e) => vec![ConfigIssue::new(
                "server.bind",
                format!("'{}' is not a socket address: {}", self.bind, e),
            )],
        }
    }
}
