// src/dispatch/sort.rs
// =============================================================================
// Orders collected visits by response size.
//
// This is the only place that decides output order. The collector hands over
// visits in completion order, which is meaningless on its own.
// =============================================================================

use std::cmp::Reverse;

use crate::fetch::Visit;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest response first
    #[default]
    Ascending,
    /// Largest response first
    Descending,
}

/// Sorts by `body_size` only. Stable in both directions, so visits with the
/// same size keep their relative order.
pub fn sort_visits(visits: &mut [Visit], order: SortOrder) {
    match order {
        SortOrder::Ascending => visits.sort_by_key(|visit| visit.body_size),
        SortOrder::Descending => visits.sort_by_key(|visit| Reverse(visit.body_size)),
    }
}
