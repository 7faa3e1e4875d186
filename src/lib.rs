pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod logger;
pub mod reporting;
pub mod sources;
pub mod utils;

// Re-export main types for easier access
pub use crate::core::{Target, TargetKind};
pub use engine::{Options, RunSummary, ScanSession};
pub use error::{LeakerError, LeakerResult, SourceError};
pub use reporting::{Finding, OutputFormat};
pub use sources::{Source, SourceRegistry};
