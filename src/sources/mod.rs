// src/sources/mod.rs
use async_trait::async_trait;

use crate::core::Target;
use crate::error::SourceError;

mod hudsonrock;
mod leakcheck;
mod proxynova;
pub mod registry;
pub mod selector;

pub use hudsonrock::HudsonRockSource;
pub use leakcheck::LeakCheckSource;
pub use proxynova::ProxyNovaSource;
pub use registry::SourceRegistry;
pub use selector::{resolve, ALL_SOURCES};

/// Trait for leak lookup sources
///
/// Implementations must not keep per-query state: one instance is shared by
/// every concurrent query of every scan session.
#[async_trait]
pub trait Source: Send + Sync {
    /// Unique name used for selection and for output attribution
    fn name(&self) -> &str;

    /// Short human-readable description
    fn description(&self) -> &str {
        ""
    }

    /// Look up a target. Each returned string is one match; an empty vector
    /// (or `SourceError::NotFound`) means the target is not known to the source.
    async fn query(&self, target: &Target) -> Result<Vec<String>, SourceError>;
}
