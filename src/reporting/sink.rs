// src/reporting/sink.rs
use std::io::{self, Write};

use serde::Serialize;
use tracing::warn;

use super::format::OutputFormat;

/// One successful match of one (target, source) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub source: String,
    pub target: String,
    pub value: String,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    source: &'a str,
    target: &'a str,
    value: &'a str,
}

/// Write one result as a plain line: `value`, or `[source] value` when verbose.
pub fn write_plain<W: Write + ?Sized>(writer: &mut W, verbose: bool, source: &str, value: &str) -> io::Result<()> {
    let line = if verbose {
        format!("[{}] {}\n", source, value)
    } else {
        format!("{}\n", value)
    };
    writer.write_all(line.as_bytes())
}

/// Write one result as a single-line JSON object with `source`, `target` and `value`.
pub fn write_json<W: Write + ?Sized>(writer: &mut W, source: &str, value: &str, target: &str) -> io::Result<()> {
    let mut line = serde_json::to_vec(&JsonRecord { source, target, value })?;
    line.push(b'\n');
    writer.write_all(&line)
}

/// Encodes findings and writes them to every configured output.
///
/// Each output gets the same encoding. When one output fails the others are
/// still written, and the first error is returned.
pub struct ResultSink<'a, W: Write> {
    outputs: &'a mut [W],
    format: OutputFormat,
    verbose: bool,
    written: usize,
}

impl<'a, W: Write> ResultSink<'a, W> {
    pub fn new(outputs: &'a mut [W], format: OutputFormat, verbose: bool) -> Self {
        Self {
            outputs,
            format,
            verbose,
            written: 0,
        }
    }

    pub fn write(&mut self, finding: &Finding) -> io::Result<()> {
        let format = self.format;
        let verbose = self.verbose;
        let result = self.each_output(|output| match format {
            OutputFormat::Plain => write_plain(output, verbose, &finding.source, &finding.value),
            OutputFormat::Json => write_json(output, &finding.source, &finding.value, &finding.target),
        });
        if result.is_ok() {
            self.written += 1;
        }
        result
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.each_output(|output| output.flush())
    }

    /// Number of findings written to every output
    pub fn written(&self) -> usize {
        self.written
    }

    fn each_output<F>(&mut self, mut op: F) -> io::Result<()>
    where
        F: FnMut(&mut W) -> io::Result<()>,
    {
        let mut first_error = None;
        for (position, output) in self.outputs.iter_mut().enumerate() {
            if let Err(e) = op(output) {
                warn!("Output #{} failed: {}", position, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
