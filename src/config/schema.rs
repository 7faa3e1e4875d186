use serde::{Deserialize, Serialize};

use crate::sources::ALL_SOURCES;
use crate::utils::http::default_user_agent;

/// Settings file / environment configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Sources queried when the command line does not name any
    pub sources: Vec<String>,
    /// Per-query timeout in seconds
    pub timeout_seconds: u64,
    /// Targets in flight at once; 0 means one per CPU
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![ALL_SOURCES.to_string()],
            timeout_seconds: 30,
            concurrency: 0,
            user_agent: default_user_agent(),
        }
    }
}
