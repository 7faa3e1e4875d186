// src/sources/selector.rs
use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::{Source, SourceRegistry};
use crate::error::{LeakerError, LeakerResult};

/// Sentinel that selects every registered source
pub const ALL_SOURCES: &str = "all";

/// Resolve requested source names into a freshly allocated list of sources.
///
/// `"all"` anywhere in the list selects the whole registry in registry order.
/// Repeated names are queried once. Any unknown name fails the whole call.
pub fn resolve(names: &[String], registry: &SourceRegistry) -> LeakerResult<Vec<Arc<dyn Source>>> {
    if names.iter().any(|name| name == ALL_SOURCES) {
        debug!("Selecting all {} sources", registry.len());
        return Ok(registry.iter().cloned().collect());
    }

    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(names.len());
    let mut unknown = Vec::new();

    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }
        match registry.get(name) {
            Some(source) => selected.push(source),
            None => unknown.push(name.clone()),
        }
    }

    if !unknown.is_empty() {
        return Err(LeakerError::UnknownSources(unknown));
    }

    debug!("Selected sources: {}", names.join(", "));
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::registry::tests::NamedSource;

    fn registry() -> SourceRegistry {
        let sources: Vec<Arc<dyn Source>> = vec![
            Arc::new(NamedSource("hudsonrock")),
            Arc::new(NamedSource("leakcheck")),
            Arc::new(NamedSource("proxynova")),
        ];
        SourceRegistry::from_sources(sources).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn source_names(sources: &[Arc<dyn Source>]) -> Vec<String> {
        sources.iter().map(|source| source.name().to_string()).collect()
    }

    #[test]
    fn test_all_selects_every_source() {
        let registry = registry();
        let selected = resolve(&names(&["all"]), &registry).unwrap();
        assert_eq!(selected.len(), registry.len());
        assert_eq!(source_names(&selected), vec!["hudsonrock", "leakcheck", "proxynova"]);
    }

    #[test]
    fn test_all_wins_over_other_names() {
        let registry = registry();
        let selected = resolve(&names(&["proxynova", "all", "bogus"]), &registry).unwrap();
        assert_eq!(selected.len(), registry.len());
    }

    #[test]
    fn test_all_is_case_sensitive() {
        let result = resolve(&names(&["ALL"]), &registry());
        assert!(matches!(result, Err(LeakerError::UnknownSources(unknown)) if unknown == vec!["ALL"]));
    }

    #[test]
    fn test_specific_source() {
        let selected = resolve(&names(&["proxynova"]), &registry()).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), "proxynova");
    }

    #[test]
    fn test_unknown_source_fails_without_partial_list() {
        let result = resolve(&names(&["leakcheck", "nonexistent-source", "other"]), &registry());
        match result {
            Err(LeakerError::UnknownSources(unknown)) => {
                assert_eq!(unknown, vec!["nonexistent-source", "other"]);
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected an error for an unknown source"),
        }
    }

    #[test]
    fn test_duplicates_resolve_once() {
        let selected = resolve(&names(&["leakcheck", "proxynova", "leakcheck"]), &registry()).unwrap();
        assert_eq!(source_names(&selected), vec!["leakcheck", "proxynova"]);
    }

    #[test]
    fn test_empty_request_selects_nothing() {
        assert!(resolve(&[], &registry()).unwrap().is_empty());
    }

    #[test]
    fn test_resolutions_do_not_share_state() {
        let registry = registry();
        let mut first = resolve(&names(&["all"]), &registry).unwrap();
        let second = resolve(&names(&["all"]), &registry).unwrap();

        assert_eq!(first.len(), registry.len());
        assert_eq!(second.len(), registry.len());
        assert_eq!(source_names(&first), source_names(&second));

        first.clear();
        assert_eq!(second.len(), registry.len());
        assert_eq!(resolve(&names(&["all"]), &registry).unwrap().len(), registry.len());
    }
}
