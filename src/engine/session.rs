// src/engine/session.rs
use std::io::Write;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::options::Options;
use super::task::{run_query, QueryOutcome, QueryStatus};
use crate::core::Target;
use crate::error::{LeakerError, LeakerResult, SourceError};
use crate::reporting::{Finding, ResultSink};
use crate::sources::{resolve, Source, SourceRegistry};

/// Counters reported at the end of a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Targets that passed validation and were queried
    pub targets: usize,
    /// Non-blank lines dropped by the type filter
    pub skipped: usize,
    /// Results written to the outputs
    pub findings: usize,
    /// Queries that errored or timed out
    pub failed_queries: usize,
}

/// One batch scan: its options plus its own list of selected sources.
pub struct ScanSession {
    options: Options,
    sources: Vec<Arc<dyn Source>>,
}

impl ScanSession {
    /// Resolve the requested sources against `registry`.
    ///
    /// Unknown source names fail here, before any target is read.
    pub fn new(options: Options, registry: &SourceRegistry) -> LeakerResult<Self> {
        let sources = resolve(&options.sources, registry)?;
        info!(
            "Scan session using {} source(s): {}",
            sources.len(),
            sources.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
        );
        Ok(Self { options, sources })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn sources(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }

    /// Scan every target read from `input` and write findings to `outputs`.
    ///
    /// Source failures are logged and never abort the run. Input and output
    /// errors, and cancellation through `cancel`, end the run with an error;
    /// in-flight queries are dropped in that case.
    pub async fn run<R, W>(&self, cancel: &CancellationToken, input: R, outputs: &mut [W]) -> LeakerResult<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut sink = ResultSink::new(outputs, self.options.format, self.options.verbose);
        let mut summary = RunSummary::default();

        let result = self.scan(cancel, input, &mut sink, &mut summary).await;
        let flushed = sink.flush().map_err(LeakerError::Output);
        summary.findings = sink.written();

        result?;
        flushed?;

        info!(
            "Scanned {} target(s): {} finding(s), {} skipped, {} failed queries",
            summary.targets, summary.findings, summary.skipped, summary.failed_queries
        );
        Ok(summary)
    }

    async fn scan<R, W>(
        &self,
        cancel: &CancellationToken,
        input: R,
        sink: &mut ResultSink<'_, W>,
        summary: &mut RunSummary,
    ) -> LeakerResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let fan_out = self.sources.len();
        let max_in_flight = self.options.concurrency.max(1).saturating_mul(fan_out.max(1));

        let mut lines = input.lines();
        let mut in_flight = FuturesUnordered::new();
        let mut reading = true;

        loop {
            if !reading && in_flight.is_empty() {
                return Ok(());
            }

            let can_read = reading && in_flight.len().saturating_add(fan_out) <= max_in_flight;
            let has_in_flight = !in_flight.is_empty();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Scan cancelled with {} queries in flight", in_flight.len());
                    return Err(LeakerError::Cancelled);
                }
                Some(outcome) = in_flight.next(), if has_in_flight => {
                    self.collect(outcome, sink, summary)?;
                }
                line = lines.next_line(), if can_read => {
                    match line.map_err(LeakerError::Input)? {
                        Some(line) => {
                            let Some(target) = self.accept(&line, summary) else {
                                continue;
                            };
                            summary.targets += 1;
                            let target = Arc::new(target);
                            for source in &self.sources {
                                in_flight.push(run_query(
                                    Arc::clone(source),
                                    Arc::clone(&target),
                                    self.options.timeout,
                                    cancel.clone(),
                                ));
                            }
                        }
                        None => {
                            debug!("Reached end of input");
                            reading = false;
                        }
                    }
                }
            }
        }
    }

    /// Classify and filter one input line
    fn accept(&self, line: &str, summary: &mut RunSummary) -> Option<Target> {
        let target = Target::classify(line)?;
        if !self.options.accepts(&target) {
            debug!("Skipping {} ({}): not a valid {:?} target", target, target.kind(), self.options.target_kind);
            summary.skipped += 1;
            return None;
        }
        Some(target)
    }

    fn collect<W: Write>(
        &self,
        outcome: QueryOutcome,
        sink: &mut ResultSink<'_, W>,
        summary: &mut RunSummary,
    ) -> LeakerResult<()> {
        match outcome.status {
            QueryStatus::Matched(values) => {
                debug!("{} returned {} result(s) for {} in {:?}", outcome.source, values.len(), outcome.target, outcome.elapsed);
                for value in values {
                    let finding = Finding {
                        source: outcome.source.clone(),
                        target: outcome.target.value().to_string(),
                        value,
                    };
                    sink.write(&finding).map_err(LeakerError::Output)?;
                }
            }
            QueryStatus::NoMatch => {
                debug!("{} has no results for {}", outcome.source, outcome.target);
            }
            QueryStatus::Failed(SourceError::Cancelled) => {}
            QueryStatus::Failed(e) => {
                summary.failed_queries += 1;
                warn!("Source {} failed for {}: {}", outcome.source, outcome.target, e);
            }
        }
        Ok(())
    }
}
