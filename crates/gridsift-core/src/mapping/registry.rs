//! Ordered mapping registries and default-sort resolution.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{BoundField, CollectionField, FilterMapping};
use crate::error::{Result, SearchError};
use crate::filter::SortDirection;

/// The ordered set of field mappings for one entity type.
///
/// Built once at startup with the `with_*` methods (which take and return
/// the registry by value, so a shared registry can never be mutated), then
/// used read-only by any number of concurrent searches. Field names are
/// unique; the first registration of a name wins and later duplicates are
/// ignored, matching first-match lookup semantics.
pub struct MappingRegistry<T> {
    mappings: IndexMap<String, Arc<dyn FilterMapping<T>>>,
    explicit_default: Option<(String, SortDirection)>,
}

impl<T> fmt::Debug for MappingRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingRegistry")
            .field("fields", &self.mappings.keys().collect::<Vec<_>>())
            .field("explicit_default", &self.explicit_default)
            .finish()
    }
}

impl<T: 'static> Default for MappingRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> MappingRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mappings: IndexMap::new(),
            explicit_default: None,
        }
    }

    /// Registers a flat field mapping.
    #[must_use]
    pub fn with_field(mut self, mapping: BoundField<T>) -> Self {
        self.register(Arc::new(mapping));
        self
    }

    /// Registers a collection-backed mapping.
    #[must_use]
    pub fn with_collection(mut self, mapping: CollectionField<T>) -> Self {
        self.register(Arc::new(mapping));
        self
    }

    /// Registers a custom [`FilterMapping`] implementation.
    #[must_use]
    pub fn with_mapping(mut self, mapping: Arc<dyn FilterMapping<T>>) -> Self {
        self.register(mapping);
        self
    }

    /// Pins the default sort to a registered field and direction.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownSortField`] when no mapping carries the
    /// given field name, so a misconfigured default fails at build time
    /// rather than on the first request.
    pub fn with_default_sort(
        mut self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Result<Self> {
        let field = field.into();
        if !self.mappings.contains_key(&field) {
            return Err(SearchError::UnknownSortField(field));
        }
        self.explicit_default = Some((field, direction));
        Ok(self)
    }

    fn register(&mut self, mapping: Arc<dyn FilterMapping<T>>) {
        let field = mapping.field().to_owned();
        self.mappings.entry(field).or_insert(mapping);
    }

    /// Number of registered mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Looks up a mapping by field name. Lookup is case-sensitive.
    #[must_use]
    pub fn mapping(&self, field: &str) -> Option<&Arc<dyn FilterMapping<T>>> {
        self.mappings.get(field)
    }

    /// Resolves a filter field or fails with [`SearchError::UnknownField`].
    pub fn require_mapping(&self, field: &str) -> Result<&Arc<dyn FilterMapping<T>>> {
        self.mapping(field)
            .ok_or_else(|| SearchError::UnknownField(field.to_owned()))
    }

    /// Resolves a sort field or fails with [`SearchError::UnknownSortField`].
    pub fn sort_mapping(&self, field: &str) -> Result<&Arc<dyn FilterMapping<T>>> {
        self.mapping(field)
            .ok_or_else(|| SearchError::UnknownSortField(field.to_owned()))
    }

    /// Resolves the registry's default sort.
    ///
    /// Priority: the explicitly pinned field and direction, then the first
    /// mapping flagged as default sort, then the first registered mapping;
    /// the two fallbacks sort ascending.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoDefaultSort`] when the registry is empty.
    pub fn default_sort(&self) -> Result<(&Arc<dyn FilterMapping<T>>, SortDirection)> {
        if let Some((field, direction)) = &self.explicit_default {
            return Ok((self.sort_mapping(field)?, *direction));
        }
        if let Some(mapping) = self.mappings.values().find(|m| m.is_default_sort()) {
            return Ok((mapping, SortDirection::Asc));
        }
        self.mappings
            .values()
            .next()
            .map(|mapping| (mapping, SortDirection::Asc))
            .ok_or(SearchError::NoDefaultSort)
    }
}
