// src/sources/registry.rs
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{HudsonRockSource, LeakCheckSource, ProxyNovaSource, Source};
use crate::error::{LeakerError, LeakerResult};
use crate::utils::HttpClient;

/// Frozen catalog of lookup sources.
///
/// Populated once and never mutated afterwards, so it can be read from any
/// number of sessions without synchronization.
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
    index: HashMap<String, usize>,
}

impl SourceRegistry {
    /// Build a registry from an ordered list of sources. Names must be unique.
    pub fn from_sources(sources: Vec<Arc<dyn Source>>) -> LeakerResult<Self> {
        let mut index = HashMap::with_capacity(sources.len());

        for (position, source) in sources.iter().enumerate() {
            let name = source.name().to_string();
            if index.insert(name.clone(), position).is_some() {
                return Err(LeakerError::DuplicateSource(name));
            }
            debug!("Registered source: {}", name);
        }

        Ok(Self { sources, index })
    }

    /// Build the registry of built-in sources, all sharing one HTTP client.
    ///
    /// Called once at process start; the result is only ever read afterwards.
    pub fn builtin(user_agent: Option<String>) -> LeakerResult<Self> {
        let client = HttpClient::new(user_agent)?;

        let sources: Vec<Arc<dyn Source>> = vec![
            Arc::new(HudsonRockSource::new(client.clone())),
            Arc::new(LeakCheckSource::new(client.clone())),
            Arc::new(ProxyNovaSource::new(client)),
        ];

        Self::from_sources(sources)
    }

    /// All source names in registration order
    pub fn all_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Source>> {
        self.index.get(name).map(|&position| Arc::clone(&self.sources[position]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.all_names())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::Target;
    use crate::error::SourceError;
    use async_trait::async_trait;

    pub(crate) struct NamedSource(pub &'static str);

    #[async_trait]
    impl Source for NamedSource {
        fn name(&self) -> &str {
            self.0
        }

        async fn query(&self, _target: &Target) -> Result<Vec<String>, SourceError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_builtin_names_are_stable_and_unique() {
        let registry = SourceRegistry::builtin(None).unwrap();
        assert_eq!(registry.all_names(), vec!["hudsonrock", "leakcheck", "proxynova"]);
        assert_eq!(registry.all_names(), registry.all_names());
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("proxynova"));
        assert!(!registry.contains("ProxyNova"));
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = SourceRegistry::builtin(None).unwrap();
        let source = registry.get("leakcheck").unwrap();
        assert_eq!(source.name(), "leakcheck");
        assert!(registry.get("nonexistent-source").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let sources: Vec<Arc<dyn Source>> = vec![Arc::new(NamedSource("a")), Arc::new(NamedSource("a"))];
        let result = SourceRegistry::from_sources(sources);
        assert!(matches!(result, Err(LeakerError::DuplicateSource(name)) if name == "a"));
    }

    #[test]
    fn test_custom_registry_keeps_order() {
        let sources: Vec<Arc<dyn Source>> = vec![Arc::new(NamedSource("zeta")), Arc::new(NamedSource("alpha"))];
        let registry = SourceRegistry::from_sources(sources).unwrap();
        assert_eq!(registry.all_names(), vec!["zeta", "alpha"]);
    }
}
