//! Flat typed field mappings.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::{FilterMapping, Predicate, RowOrdering};
use crate::error::{Result, SearchError};
use crate::filter::Comparator;
use crate::value::{EnumTable, FieldKind, FieldValue};

type Accessor<T> = Arc<dyn Fn(&T) -> FieldValue + Send + Sync>;

/// Maps one field name onto a typed attribute of `T`.
///
/// The accessor and declared [`FieldKind`] are fixed at construction, so
/// every compile dispatches over the kind tag without any runtime type
/// inspection. Optional attributes are handled by returning
/// [`FieldValue::Null`] from the accessor, which the `From<Option<_>>`
/// conversion does for free.
///
/// ```rust,ignore
/// let age = BoundField::new("age", FieldKind::Int, |p: &Person| p.age);
/// let nick = BoundField::new("nickname", FieldKind::Str, |p: &Person| p.nickname.clone());
/// ```
pub struct BoundField<T> {
    field: String,
    kind: FieldKind,
    accessor: Accessor<T>,
    default_sort: bool,
}

impl<T> fmt::Debug for BoundField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundField")
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("default_sort", &self.default_sort)
            .finish_non_exhaustive()
    }
}

impl<T> Clone for BoundField<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            kind: self.kind.clone(),
            accessor: Arc::clone(&self.accessor),
            default_sort: self.default_sort,
        }
    }
}

impl<T: 'static> BoundField<T> {
    /// Creates a mapping from a field name, its declared kind, and an
    /// accessor returning anything convertible into [`FieldValue`].
    #[must_use]
    pub fn new<A, V>(field: impl Into<String>, kind: FieldKind, accessor: A) -> Self
    where
        A: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<FieldValue>,
    {
        Self {
            field: field.into(),
            kind,
            accessor: Arc::new(move |entity| accessor(entity).into()),
            default_sort: false,
        }
    }

    /// Flags this mapping as the registry's default sort.
    #[must_use]
    pub fn default_sort(mut self) -> Self {
        self.default_sort = true;
        self
    }

    fn unsupported(&self, comparator: Comparator) -> SearchError {
        SearchError::BadComparator {
            field: self.field.clone(),
            comparator,
            kind: self.kind.name(),
        }
    }

    /// Ordering comparators need a magnitude; booleans and guids have none.
    fn ensure_supported(&self, comparator: Comparator) -> Result<()> {
        let ordered = matches!(
            comparator,
            Comparator::Gt | Comparator::GtEq | Comparator::Lt | Comparator::LtEq
        );
        if ordered && matches!(self.kind, FieldKind::Bool | FieldKind::Guid) {
            return Err(self.unsupported(comparator));
        }
        Ok(())
    }

    fn comparison_predicate(
        &self,
        value: &str,
        comparator: Comparator,
    ) -> Result<Option<Predicate<T>>> {
        let Some(target) = self.kind.parse(&self.field, value)? else {
            return Ok(None);
        };
        let accessor = Arc::clone(&self.accessor);
        Ok(Some(Box::new(move |entity| {
            let actual = accessor(entity);
            match comparator {
                Comparator::Eq => actual.eq_value(&target),
                Comparator::NEq => !actual.eq_value(&target),
                Comparator::Gt => actual.cmp_value(&target) == Some(Ordering::Greater),
                Comparator::Lt => actual.cmp_value(&target) == Some(Ordering::Less),
                Comparator::GtEq => matches!(
                    actual.cmp_value(&target),
                    Some(Ordering::Greater | Ordering::Equal)
                ),
                Comparator::LtEq => matches!(
                    actual.cmp_value(&target),
                    Some(Ordering::Less | Ordering::Equal)
                ),
                // routed to the dedicated paths before this closure exists
                Comparator::Like | Comparator::ILike | Comparator::In => false,
            }
        })))
    }

    fn like_predicate(&self, value: &str) -> Predicate<T> {
        let needle = value.to_lowercase();
        let accessor = Arc::clone(&self.accessor);
        Box::new(move |entity| {
            accessor(entity)
                .as_like_text()
                .to_lowercase()
                .contains(&needle)
        })
    }

    fn membership_predicate(&self, value: &str) -> Result<Option<Predicate<T>>> {
        let targets = self.kind.parse_list(&self.field, value)?;
        if targets.is_empty() {
            return Ok(None);
        }
        let accessor = Arc::clone(&self.accessor);
        Ok(Some(Box::new(move |entity| {
            let actual = accessor(entity);
            targets.iter().any(|target| actual.eq_value(target))
        })))
    }

    /// Enum comparators reduce to membership over a set of ordinals drawn
    /// from the declared member table.
    fn enum_predicate(
        &self,
        table: &EnumTable,
        value: &str,
        comparator: Comparator,
    ) -> Result<Option<Predicate<T>>> {
        let members: Vec<usize> = match comparator {
            Comparator::Eq | Comparator::NEq => table.ordinal_of(value).into_iter().collect(),
            Comparator::Gt | Comparator::GtEq | Comparator::Lt | Comparator::LtEq => {
                match table.ordinal_of(value) {
                    Some(anchor) => (0..table.len())
                        .filter(|&ordinal| match comparator {
                            Comparator::Gt => ordinal > anchor,
                            Comparator::GtEq => ordinal >= anchor,
                            Comparator::Lt => ordinal < anchor,
                            _ => ordinal <= anchor,
                        })
                        .collect(),
                    // unknown anchor member: match nothing
                    None => Vec::new(),
                }
            }
            Comparator::Like | Comparator::ILike => table.matching(value),
            Comparator::In => return Err(self.unsupported(comparator)),
        };
        let negate = comparator == Comparator::NEq;
        let accessor = Arc::clone(&self.accessor);
        Ok(Some(Box::new(move |entity| {
            let matched = match accessor(entity) {
                FieldValue::Enum(ordinal) => members.contains(&ordinal),
                _ => false,
            };
            matched != negate
        })))
    }
}

impl<T: 'static> FilterMapping<T> for BoundField<T> {
    fn field(&self) -> &str {
        &self.field
    }

    fn is_default_sort(&self) -> bool {
        self.default_sort
    }

    fn filter_predicate(&self, value: &str, comparator: Comparator) -> Result<Option<Predicate<T>>> {
        if let FieldKind::Enum(table) = &self.kind {
            return self.enum_predicate(table, value, comparator);
        }
        self.ensure_supported(comparator)?;
        match comparator {
            Comparator::Like | Comparator::ILike => Ok(Some(self.like_predicate(value))),
            Comparator::In => self.membership_predicate(value),
            _ => self.comparison_predicate(value, comparator),
        }
    }

    fn sort_comparator(&self, descending: bool) -> Option<RowOrdering<T>> {
        let accessor = Arc::clone(&self.accessor);
        Some(Box::new(move |a, b| {
            let ordering = accessor(a).sort_cmp(&accessor(b));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }))
    }
}
