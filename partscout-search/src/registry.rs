//! The ordered collection of known catalog sources.
//!
//! Sources are held as data — `Arc<dyn PartSource>` values registered in a
//! fixed order — so adding a retailer means registering a new value, never
//! subclassing. Registry order is the order items appear in merged results.

use crate::error::SearchError;
use crate::source::PartSource;
use crate::sources::{
    AppliancePartsProsSource, PartSelectSource, ReliablePartsSource, RepairClinicSource,
    SearsPartsDirectSource,
};
use std::sync::Arc;

/// Ordered registry of catalog sources, keyed by unique name.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn PartSource>>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry of built-in retailer sources, in their
    /// canonical order.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for source in [
            Arc::new(PartSelectSource) as Arc<dyn PartSource>,
            Arc::new(RepairClinicSource),
            Arc::new(AppliancePartsProsSource),
            Arc::new(SearsPartsDirectSource),
            Arc::new(ReliablePartsSource),
        ] {
            // Built-in names are unique by construction.
            let name = source.name();
            registry
                .register(source)
                .unwrap_or_else(|_| unreachable!("duplicate builtin source {name}"));
        }
        registry
    }

    /// Register a source, enforcing global name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if a source with the same name is
    /// already registered.
    pub fn register(&mut self, source: Arc<dyn PartSource>) -> Result<(), SearchError> {
        if self.sources.iter().any(|s| s.name() == source.name()) {
            return Err(SearchError::Config(format!(
                "duplicate source name: {}",
                source.name()
            )));
        }
        self.sources.push(source);
        Ok(())
    }

    /// All registered sources, in registration order.
    pub fn all(&self) -> &[Arc<dyn PartSource>] {
        &self.sources
    }

    /// The names of all registered sources, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Filter registered sources to those whose name is in `names`,
    /// preserving registry order (not caller order).
    ///
    /// An empty `names` slice means "no filter" and returns the full
    /// registry; distinguishing "user deselected everything" from "no
    /// filter given" is the caller's job at query-validation time.
    pub fn select(&self, names: &[String]) -> Vec<Arc<dyn PartSource>> {
        if names.is_empty() {
            return self.sources.clone();
        }
        self.sources
            .iter()
            .filter(|s| names.iter().any(|n| n == s.name()))
            .cloned()
            .collect()
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the registry holds no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.names())
            .finish()
    }
}
