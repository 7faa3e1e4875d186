mod format;
pub(crate) mod sink;

pub use format::OutputFormat;
pub use sink::{write_json, write_plain, Finding, ResultSink};
