use std::time::Duration;

use crate::core::{Target, TargetKind};
use crate::reporting::OutputFormat;
use crate::sources::ALL_SOURCES;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound accepted for `concurrency` from the command line and config
pub const MAX_CONCURRENCY: usize = 1024;

/// Configuration of one scan invocation.
///
/// Built once by the caller and owned by a `ScanSession`; never changed
/// while the session runs.
#[derive(Debug, Clone)]
pub struct Options {
    /// Source names to query, or `"all"`
    pub sources: Vec<String>,
    /// Only scan targets of this kind (unless `no_filter` is set)
    pub target_kind: Option<TargetKind>,
    pub no_filter: bool,
    /// Upper bound for a single (target, source) query
    pub timeout: Duration,
    /// Maximum number of targets being queried at once
    pub concurrency: usize,
    pub verbose: bool,
    pub format: OutputFormat,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sources: vec![ALL_SOURCES.to_string()],
            target_kind: None,
            no_filter: false,
            timeout: DEFAULT_TIMEOUT,
            concurrency: num_cpus::get(),
            verbose: false,
            format: OutputFormat::Plain,
        }
    }
}

impl Options {
    /// Whether a classified target passes the type filter
    pub fn accepts(&self, target: &Target) -> bool {
        match self.target_kind {
            Some(kind) if !self.no_filter => target.kind() == kind,
            _ => true,
        }
    }
}
