//! Field mappings: from abstract field names to typed entity behavior.
//!
//! A mapping binds one field name to three capabilities: building a typed
//! predicate for a (comparator, value) pair, producing a row ordering for
//! sorts, and flagging itself as the registry's default sort. Flat fields
//! are covered by [`BoundField`], nested-collection existential conditions
//! by [`CollectionField`], and [`MappingRegistry`] holds the ordered set of
//! mappings for one entity type.

mod collection;
mod field;
mod registry;

use std::cmp::Ordering;

pub use collection::{CollectionChain, CollectionField};
pub use field::BoundField;
pub use registry::MappingRegistry;

use crate::error::Result;
use crate::filter::Comparator;

/// A compiled boolean test over one entity.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A row-ordering comparator produced by sort resolution.
pub type RowOrdering<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Binds an abstract field name to predicate construction and sorting for
/// entities of type `T`.
///
/// Implementations are registered once in a [`MappingRegistry`] and then
/// shared read-only across concurrent searches.
pub trait FilterMapping<T: 'static>: Send + Sync {
    /// The abstract field name clients use in filters and sorts.
    fn field(&self) -> &str;

    /// `true` if this mapping is the registry's flagged default sort.
    fn is_default_sort(&self) -> bool {
        false
    }

    /// Builds a predicate for one filter value and comparator.
    ///
    /// `Ok(None)` means the filter contributes nothing (a lenient parse
    /// failure) and the compiler drops it; errors follow the taxonomy in
    /// [`crate::error::SearchError`].
    fn filter_predicate(&self, value: &str, comparator: Comparator) -> Result<Option<Predicate<T>>>;

    /// Produces the row ordering for a sort through this field, or `None`
    /// when sorting is unsupported (existential collection conditions have
    /// no single sort key).
    fn sort_comparator(&self, descending: bool) -> Option<RowOrdering<T>>;
}
