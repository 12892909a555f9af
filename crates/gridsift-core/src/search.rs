//! Search execution: filtering, sorting, and pagination.
//!
//! [`search`] is the in-memory reference executor. It resolves sorting
//! before touching any row, applies the compiled predicate, orders rows with
//! the primary comparator tie-broken by the registry's default sort, counts
//! the filtered set, and returns the requested page window.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compile::compile;
use crate::error::Result;
use crate::filter::{FilterSet, SortDirection};
use crate::mapping::{MappingRegistry, RowOrdering};

/// One page of results plus the pre-pagination cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    /// Rows of the requested page, in sorted order.
    pub results: Vec<T>,
    /// Number of rows matching the filter before windowing.
    pub total_results: usize,
}

impl<T> SearchResult<T> {
    /// Creates a result envelope.
    #[must_use]
    pub fn new(results: Vec<T>, total_results: usize) -> Self {
        Self {
            results,
            total_results,
        }
    }
}

/// Runs a search request against an in-memory source.
///
/// Page numbers below 1 are silently clamped to 1. The root filter group is
/// compiled only when it carries members ([`FilterSet::has_filters`]); a
/// vacuous tree therefore costs nothing. An explicit `sort_by` is applied in
/// the requested direction with the registry's default sort as a
/// deterministic tie-breaker, so paged calls with duplicate primary keys
/// keep a stable order; without `sort_by` the default sort alone applies.
///
/// # Errors
///
/// `UnknownSortField` when `sort_by` is not registered, `NoDefaultSort` when
/// the registry is empty, plus the compile-time taxonomy of
/// [`compile`](crate::compile::compile). Sort resolution runs first, so a
/// bad sort field fails before any row is touched.
pub fn search<T>(
    source: &[T],
    filter_set: &FilterSet,
    registry: &MappingRegistry<T>,
) -> Result<SearchResult<T>>
where
    T: Clone + 'static,
{
    let page_number = filter_set.page_number.max(1);
    let comparators = resolve_sort(filter_set, registry)?;

    let mut rows: Vec<&T> = if filter_set.has_filters() {
        let predicate = compile(&filter_set.filter, registry)?;
        source.iter().filter(|row| predicate(row)).collect()
    } else {
        source.iter().collect()
    };

    if !comparators.is_empty() {
        rows.sort_by(|a, b| {
            for comparator in &comparators {
                let ordering = comparator(a, b);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    let total_results = rows.len();
    let page_size = filter_set.page_size.max(0);
    let offset = usize::try_from((page_number - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
    let limit = usize::try_from(page_size).unwrap_or(usize::MAX);
    let results: Vec<T> = rows.into_iter().skip(offset).take(limit).cloned().collect();

    debug!(
        total_results,
        page = page_number,
        returned = results.len(),
        "search executed"
    );

    Ok(SearchResult::new(results, total_results))
}

/// Builds the comparator chain: explicit sort first (when requested), then
/// the registry default as tie-breaker. Sort-unsupported mappings contribute
/// no comparator at their position.
fn resolve_sort<T: 'static>(
    filter_set: &FilterSet,
    registry: &MappingRegistry<T>,
) -> Result<Vec<RowOrdering<T>>> {
    let mut comparators = Vec::with_capacity(2);

    if let Some(sort_by) = &filter_set.sort_by {
        let mapping = registry.sort_mapping(sort_by)?;
        let descending = filter_set.sort_dir == SortDirection::Desc;
        if let Some(comparator) = mapping.sort_comparator(descending) {
            comparators.push(comparator);
        }
    }

    let (default_mapping, default_direction) = registry.default_sort()?;
    if let Some(comparator) =
        default_mapping.sort_comparator(default_direction == SortDirection::Desc)
    {
        comparators.push(comparator);
    }

    Ok(comparators)
}
