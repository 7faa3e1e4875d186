mod options;
mod session;
mod task;

pub use options::{Options, DEFAULT_TIMEOUT, MAX_CONCURRENCY};
pub use session::{RunSummary, ScanSession};
pub use task::{run_query, QueryOutcome, QueryStatus};
