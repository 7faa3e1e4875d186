// src/engine/task.rs
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::core::Target;
use crate::error::SourceError;
use crate::sources::Source;

/// Outcome of one (target, source) query
#[derive(Debug)]
pub enum QueryStatus {
    Matched(Vec<String>),
    NoMatch,
    Failed(SourceError),
}

#[derive(Debug)]
pub struct QueryOutcome {
    pub source: String,
    pub target: Arc<Target>,
    pub status: QueryStatus,
    pub elapsed: Duration,
}

/// Query one source for one target.
///
/// The query is bounded by `timeout` and aborted when `cancel` fires. Errors,
/// timeouts and panics all end up in the outcome; nothing escapes to siblings.
pub async fn run_query(
    source: Arc<dyn Source>,
    target: Arc<Target>,
    timeout: Duration,
    cancel: CancellationToken,
) -> QueryOutcome {
    let start = Instant::now();
    let query = AssertUnwindSafe(source.query(&target)).catch_unwind();

    let status = tokio::select! {
        biased;
        _ = cancel.cancelled() => QueryStatus::Failed(SourceError::Cancelled),
        result = tokio::time::timeout(timeout, query) => match result {
            Err(_) => QueryStatus::Failed(SourceError::Timeout(timeout)),
            Ok(Err(_)) => QueryStatus::Failed(SourceError::Panicked),
            Ok(Ok(Err(SourceError::NotFound))) => QueryStatus::NoMatch,
            Ok(Ok(Err(e))) => QueryStatus::Failed(e),
            Ok(Ok(Ok(values))) => {
                let values: Vec<String> = values.into_iter().filter(|v| !v.trim().is_empty()).collect();
                if values.is_empty() {
                    QueryStatus::NoMatch
                } else {
                    QueryStatus::Matched(values)
                }
            }
        },
    };

    QueryOutcome {
        source: source.name().to_string(),
        target,
        status,
        elapsed: start.elapsed(),
    }
}
