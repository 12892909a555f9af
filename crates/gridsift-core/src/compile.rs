//! Compilation of filter trees into predicates.
//!
//! [`compile`] walks a [`FilterGroup`] tree and folds every effective member
//! into one boolean test over the entity type. The fold seeds each group with
//! the algebraic identity of its operator (`true` for AND, `false` for OR),
//! so combining terms in never changes the outcome until a real term lands.
//! A group whose members all turn out empty or unparseable is vacuous: it
//! imposes no constraint, which for an OR group requires replacing the
//! untouched `false` seed with `true`.

use tracing::debug;

use crate::error::Result;
use crate::filter::{FilterGroup, FilterOperator};
use crate::mapping::{MappingRegistry, Predicate};

/// Compiles a filter group tree into a single predicate.
///
/// Leaf filters with blank values are skipped before field resolution, so
/// only effective filters can raise [`crate::SearchError::UnknownField`].
/// A leaf whose value fails the lenient parse contributes nothing and is
/// logged at debug level.
///
/// # Errors
///
/// Surfaces the compile-time taxonomy: `UnknownField`, `BadFilterValue` for
/// malformed dates, and `BadComparator` for structurally unsupported
/// comparator/kind pairs.
pub fn compile<T: 'static>(
    group: &FilterGroup,
    registry: &MappingRegistry<T>,
) -> Result<Predicate<T>> {
    let mut predicate: Predicate<T> = match group.operator {
        FilterOperator::And => Box::new(|_| true),
        FilterOperator::Or => Box::new(|_| false),
    };
    let mut applied = false;

    for filter in &group.filters {
        if filter.value.trim().is_empty() {
            continue;
        }
        let mapping = registry.require_mapping(&filter.field)?;
        match mapping.filter_predicate(&filter.value, filter.action)? {
            Some(term) => {
                predicate = combine(predicate, term, group.operator);
                applied = true;
            }
            None => {
                debug!(
                    field = %filter.field,
                    value = %filter.value,
                    "filter dropped: value did not parse as the field's kind"
                );
            }
        }
    }

    for nested in &group.filter_groups {
        let term = compile(nested, registry)?;
        predicate = combine(predicate, term, group.operator);
        applied = true;
    }

    // A vacuous OR must impose no constraint instead of matching nothing.
    if !applied && group.operator == FilterOperator::Or {
        return Ok(Box::new(|_| true));
    }

    Ok(predicate)
}

fn combine<T: 'static>(
    left: Predicate<T>,
    right: Predicate<T>,
    operator: FilterOperator,
) -> Predicate<T> {
    match operator {
        FilterOperator::And => Box::new(move |entity| left(entity) && right(entity)),
        FilterOperator::Or => Box::new(move |entity| left(entity) || right(entity)),
    }
}
