//! Declarative filter model for search requests.
//!
//! This module provides the serializable request types a client assembles to
//! describe a search: leaf filters (field, comparator, value), AND/OR groups
//! of them, and the [`FilterSet`] envelope carrying paging and sorting.
//! Values are always carried as text; typed parsing happens at compile time
//! against each field's declared kind.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridsift_core::{Comparator, Filter, FilterGroup, FilterSet, SortDirection};
//!
//! let request = FilterSet::new(1, 25)
//!     .sorted_by("lastName", SortDirection::Asc)
//!     .with_filter(
//!         FilterGroup::or()
//!             .with_filter(Filter::like("firstName", "an"))
//!             .with_filter(Filter::like("lastName", "an")),
//!     );
//! ```

use serde::{Deserialize, Serialize};

/// Comparison operator applied by a leaf [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Equal to the parsed value.
    Eq,
    /// Strictly greater than the parsed value.
    Gt,
    /// Strictly less than the parsed value.
    Lt,
    /// Greater than or equal to the parsed value.
    GtEq,
    /// Less than or equal to the parsed value.
    LtEq,
    /// Not equal to the parsed value.
    NEq,
    /// Case-insensitive substring containment.
    Like,
    /// Case-insensitive substring containment (alias kept for wire
    /// compatibility; the test is identical to `Like`).
    ILike,
    /// Membership in a comma-separated list of values.
    In,
}

/// Boolean operator combining the members of a [`FilterGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Every member must match.
    And,
    /// At least one member must match.
    Or,
}

/// Sort direction for explicit and default sorts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// A single field/comparator/value condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Abstract field name, resolved through the mapping registry.
    pub field: String,
    /// Raw textual value; parsed per the field's declared kind at compile
    /// time. A blank value makes the filter contribute nothing.
    pub value: String,
    /// Comparator to apply.
    pub action: Comparator,
}

impl Filter {
    /// Creates a filter with an explicit comparator.
    #[must_use]
    pub fn new(field: impl Into<String>, action: Comparator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            action,
        }
    }

    /// Creates an equality filter.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::Eq, value)
    }

    /// Creates a not-equal filter.
    #[must_use]
    pub fn neq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::NEq, value)
    }

    /// Creates a greater-than filter.
    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::Gt, value)
    }

    /// Creates a greater-than-or-equal filter.
    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::GtEq, value)
    }

    /// Creates a less-than filter.
    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::Lt, value)
    }

    /// Creates a less-than-or-equal filter.
    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::LtEq, value)
    }

    /// Creates a case-insensitive substring filter.
    #[must_use]
    pub fn like(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::Like, value)
    }

    /// Creates a membership filter over a comma-separated value list.
    #[must_use]
    pub fn is_in(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Comparator::In, value)
    }
}

/// A boolean combination of leaf filters and nested groups.
///
/// Groups form an owned tree, so nesting is always finite and acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    /// Operator combining all members of this group.
    pub operator: FilterOperator,
    /// Leaf conditions.
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Nested groups, combined with the same operator.
    #[serde(default)]
    pub filter_groups: Vec<FilterGroup>,
}

impl FilterGroup {
    /// Creates an empty group with the given operator.
    #[must_use]
    pub fn new(operator: FilterOperator) -> Self {
        Self {
            operator,
            filters: Vec::new(),
            filter_groups: Vec::new(),
        }
    }

    /// Creates an empty AND group.
    #[must_use]
    pub fn and() -> Self {
        Self::new(FilterOperator::And)
    }

    /// Creates an empty OR group.
    #[must_use]
    pub fn or() -> Self {
        Self::new(FilterOperator::Or)
    }

    /// Appends a leaf filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends a nested group.
    #[must_use]
    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.filter_groups.push(group);
        self
    }
}

/// The complete search request: paging, sorting, and the filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    /// 1-based page number. Values below 1 are clamped to 1 by the executor.
    pub page_number: i64,
    /// Number of rows per page.
    pub page_size: i64,
    /// Explicit sort field; the registry default sort applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Direction for the explicit sort.
    #[serde(default)]
    pub sort_dir: SortDirection,
    /// Root of the filter tree.
    pub filter: FilterGroup,
}

impl FilterSet {
    /// Creates a request for the given page with an empty AND root.
    #[must_use]
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            sort_by: None,
            sort_dir: SortDirection::default(),
            filter: FilterGroup::and(),
        }
    }

    /// Sets the explicit sort field and direction.
    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_dir = direction;
        self
    }

    /// Replaces the root filter group.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterGroup) -> Self {
        self.filter = filter;
        self
    }

    /// Returns `true` if the root group carries any leaf filters or nested
    /// groups. Only the immediate root is inspected; emptiness deeper in the
    /// tree still compiles to a vacuous predicate.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.filter.filters.is_empty() || !self.filter.filter_groups.is_empty()
    }

    /// Adds an equality filter the optional tree cannot relax.
    ///
    /// With an AND root the leaf joins the root directly. An OR root is
    /// first demoted to a nested group under a fresh AND root so the
    /// required condition constrains every alternative.
    pub fn add_required_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let filter = Filter::eq(field, value);
        match self.filter.operator {
            FilterOperator::And => self.filter.filters.push(filter),
            FilterOperator::Or => {
                let optional = std::mem::replace(&mut self.filter, FilterGroup::and());
                self.filter.filters.push(filter);
                self.filter.filter_groups.push(optional);
            }
        }
    }

    /// Adds a whole required group, with the same root-demotion rule as
    /// [`FilterSet::add_required_filter`].
    pub fn add_required_group(&mut self, group: FilterGroup) {
        match self.filter.operator {
            FilterOperator::And => self.filter.filter_groups.push(group),
            FilterOperator::Or => {
                let optional = std::mem::replace(&mut self.filter, FilterGroup::and());
                self.filter.filter_groups.push(optional);
                self.filter.filter_groups.push(group);
            }
        }
    }
}
