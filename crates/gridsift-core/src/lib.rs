//! # `GridSift` Core
//!
//! Declarative filter compilation, sorting and pagination for typed
//! collections.
//!
//! `GridSift` turns serializable search requests (field/comparator/value
//! triples grouped with AND/OR) into typed predicates over your own entity
//! types, then executes them with deterministic sorting and paging. It is
//! the server-side engine behind data-grid style UIs: the client describes
//! what it wants, a mapping registry declares what each field means, and the
//! engine compiles, filters, sorts, and windows.
//!
//! ## Features
//!
//! - **Typed compilation**: untyped text filters become type-correct tests
//!   through per-field accessors declared once at startup
//! - **Boolean groups**: AND/OR trees with exact vacuity semantics (an empty
//!   OR group imposes no constraint instead of matching nothing)
//! - **Existential traversal**: "any element of this nested collection
//!   matches" conditions across arbitrary collection depth
//! - **Deterministic paging**: explicit sorts are tie-broken by the registry
//!   default, so page boundaries never reshuffle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridsift_core::{
//!     search, BoundField, FieldKind, Filter, FilterGroup, FilterSet,
//!     MappingRegistry, SortDirection,
//! };
//!
//! #[derive(Clone)]
//! struct Person { name: String, age: i64 }
//!
//! // Declare the searchable surface once, at startup
//! let registry = MappingRegistry::new()
//!     .with_field(BoundField::new("name", FieldKind::Str, |p: &Person| p.name.clone()))
//!     .with_field(BoundField::new("age", FieldKind::Int, |p: &Person| p.age))
//!     .with_default_sort("name", SortDirection::Asc)?;
//!
//! // Each request arrives as a serializable FilterSet
//! let request = FilterSet::new(1, 25)
//!     .with_filter(FilterGroup::and().with_filter(Filter::gt("age", "25")));
//!
//! let page = search(&people, &request, &registry)?;
//! println!("{} of {} match", page.results.len(), page.total_results);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

pub mod compile;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod filter;
#[cfg(test)]
mod filter_tests;
pub mod mapping;
pub mod search;
pub mod value;
#[cfg(test)]
mod value_tests;

pub use compile::compile;
pub use error::{Result, SearchError};
pub use filter::{Comparator, Filter, FilterGroup, FilterOperator, FilterSet, SortDirection};
pub use mapping::{
    BoundField, CollectionChain, CollectionField, FilterMapping, MappingRegistry, Predicate,
    RowOrdering,
};
pub use search::{search, SearchResult};
pub use value::{EnumTable, FieldKind, FieldValue};
