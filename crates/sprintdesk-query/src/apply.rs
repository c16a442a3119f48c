//! Filter application engine.
//!
//! An item survives iff, for every active key with a registered predicate,
//! the predicate holds for at least one selected value. Keys combine with
//! AND, values within a key with OR, unregistered keys are ignored.

use crate::filter::{ActiveFilters, FilterSelection};
use crate::registry::PredicateRegistry;

/// Whether one item satisfies every active filter.
pub fn matches<T>(item: &T, active: &ActiveFilters, registry: &PredicateRegistry<T>) -> bool {
    active.iter().all(|(key, selection)| {
        let Some(predicate) = registry.get(key) else {
            return true;
        };
        match selection {
            FilterSelection::One(value) => predicate(item, value),
            FilterSelection::Many(values) => values.iter().any(|value| predicate(item, value)),
        }
    })
}

/// Retain the items that satisfy `active`, preserving their order.
pub fn apply_filters<T: Clone>(
    items: &[T],
    active: &ActiveFilters,
    registry: &PredicateRegistry<T>,
) -> Vec<T> {
    if active.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches(*item, active, registry))
        .cloned()
        .collect()
}

/// Borrowing variant of [`apply_filters`].
pub fn filter_refs<'a, T>(
    items: &'a [T],
    active: &ActiveFilters,
    registry: &PredicateRegistry<T>,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches(*item, active, registry))
        .collect()
}
