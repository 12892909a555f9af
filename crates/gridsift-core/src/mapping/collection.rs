//! Existential conditions over nested collections.

use std::fmt;
use std::sync::Arc;

use super::{BoundField, FilterMapping, Predicate, RowOrdering};
use crate::error::Result;
use crate::filter::Comparator;

type PredicateWrap<T, E> = Box<dyn Fn(Predicate<E>) -> Predicate<T> + Send + Sync>;
type PredicateBuild<T> = Box<dyn Fn(&str, Comparator) -> Result<Option<Predicate<T>>> + Send + Sync>;

/// A partially built traversal chain from root entities of type `T` down to
/// elements of type `E`.
///
/// Each [`CollectionChain::then`] descends one collection further; element
/// types are erased into the existential fold as the chain is built, so no
/// per-level interface is needed. [`CollectionChain::bind`] terminates the
/// chain with the leaf field that tests each innermost element.
pub struct CollectionChain<T, E> {
    field: String,
    wrap: PredicateWrap<T, E>,
}

impl<T: 'static, E: 'static> CollectionChain<T, E> {
    /// Descends into a nested collection of the current element type.
    #[must_use]
    pub fn then<E2, A>(self, accessor: A) -> CollectionChain<T, E2>
    where
        E2: 'static,
        A: Fn(&E) -> &[E2] + Send + Sync + 'static,
    {
        let accessor = Arc::new(accessor);
        let outer = self.wrap;
        let wrap: PredicateWrap<T, E2> = Box::new(move |inner| {
            let accessor = Arc::clone(&accessor);
            let step: Predicate<E> =
                Box::new(move |element| accessor(element).iter().any(|child| inner(child)));
            outer(step)
        });
        CollectionChain {
            field: self.field,
            wrap,
        }
    }

    /// Terminates the chain with the leaf field applied to each innermost
    /// element. The leaf's own field name is not used for lookup; the chain
    /// is addressed by the name given to [`CollectionField::over`].
    #[must_use]
    pub fn bind(self, leaf: BoundField<E>) -> CollectionField<T> {
        let wrap = self.wrap;
        CollectionField {
            field: self.field,
            build: Box::new(move |value, comparator| {
                match leaf.filter_predicate(value, comparator)? {
                    Some(inner) => Ok(Some(wrap(inner))),
                    None => Ok(None),
                }
            }),
        }
    }
}

/// Maps one field name onto "at least one element of this (possibly nested)
/// collection satisfies the leaf condition".
///
/// The predicate folds from the innermost step outward: the leaf test is
/// wrapped in one `any`-combinator per collection boundary, finishing with a
/// predicate on the root entity type. Sorting through such a mapping is
/// unsupported by design, since an existential condition has no single sort
/// key.
///
/// ```rust,ignore
/// // customers -> orders -> lines, filtering on each line's quantity
/// let line_qty = CollectionField::over("lineQty", |c: &Customer| c.orders.as_slice())
///     .then(|o: &Order| o.lines.as_slice())
///     .bind(BoundField::new("lineQty", FieldKind::Int, |l: &Line| l.quantity));
/// ```
pub struct CollectionField<T> {
    field: String,
    build: PredicateBuild<T>,
}

impl<T: 'static> CollectionField<T> {
    /// Starts a chain by descending from the root entity into its first
    /// collection. The given field name addresses the whole chain.
    #[must_use]
    pub fn over<E, A>(field: impl Into<String>, accessor: A) -> CollectionChain<T, E>
    where
        E: 'static,
        A: Fn(&T) -> &[E] + Send + Sync + 'static,
    {
        let accessor = Arc::new(accessor);
        let wrap: PredicateWrap<T, E> = Box::new(move |inner| {
            let accessor = Arc::clone(&accessor);
            Box::new(move |entity| accessor(entity).iter().any(|element| inner(element)))
        });
        CollectionChain {
            field: field.into(),
            wrap,
        }
    }
}

impl<T> fmt::Debug for CollectionField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionField")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> FilterMapping<T> for CollectionField<T> {
    fn field(&self) -> &str {
        &self.field
    }

    fn filter_predicate(&self, value: &str, comparator: Comparator) -> Result<Option<Predicate<T>>> {
        (self.build)(value, comparator)
    }

    fn sort_comparator(&self, _descending: bool) -> Option<RowOrdering<T>> {
        None
    }
}
