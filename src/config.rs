//! Server configuration

use crate::error::{GossipError, GossipResult};
use crate::storage::{SamplingStrategy, SqliteConfig};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub log_level: String,
    /// Maximum STHs returned per pollination response
    pub sample_limit: usize,
    /// Reject feedback that is not well-formed base64
    pub strict_encoding: bool,
    /// How fresh STHs are sampled
    pub sampling: SamplingStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: "./gossip.db".to_string(),
            log_level: "info".to_string(),
            sample_limit: 10,
            strict_encoding: false,
            sampling: SamplingStrategy::Native,
        }
    }
}

impl Config {
    /// Reject settings the server cannot run with
    pub fn validate(&self) -> GossipResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(GossipError::Config("database path is empty".into()));
        }
        if self.sample_limit == 0 {
            return Err(GossipError::Config(
                "sample limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn to_sqlite_config(&self) -> SqliteConfig {
        SqliteConfig {
            path: self.database_path.clone(),
            sampling: self.sampling,
            ..Default::default()
        }
    }
}
