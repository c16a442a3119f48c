//! Query layer for SprintDesk list views.
//!
//! This crate owns everything a list page does to rows it already holds:
//! text search, filter composition over per-entity predicate registries,
//! the declarative filter configs behind each page's toolbar, and the
//! dashboard chart projections (plus the filters a chart click navigates to).
//!
//! It does not fetch anything (that's `sprintdesk-transport`) and keeps no
//! UI state (that's `sprintdesk-ux`).
//!
//! ```text
//! rows ──search──▶ rows ──apply_filters(ActiveFilters, registry)──▶ rows
//! ```

pub mod apply;
pub mod configs;
pub mod dashboard;
pub mod definition;
mod error;
pub mod filter;
pub mod presets;
pub mod registry;
pub mod search;

#[cfg(test)]
mod test_support;

pub use apply::{apply_filters, filter_refs, matches};
pub use dashboard::ChartDatum;
pub use definition::{
    FilterConfig, FilterDefinition, FilterOption, OptionSource, OptionsFuture, OptionsProducer,
    ResolvedConfig, ResolvedFilter, SelectionType,
};
pub use error::QueryError;
pub use filter::{ActiveFilters, FilterSelection, FilterValue};
pub use registry::{
    Predicate, PredicateRegistry, UNASSIGNED, issue_registry, project_registry, user_registry,
};
pub use search::{Searchable, matches_query, search};

/// Search, then filter: the pipeline every list page runs.
pub fn search_and_filter<T: Searchable + Clone>(
    items: &[T],
    query: &str,
    active: &ActiveFilters,
    registry: &PredicateRegistry<T>,
) -> Vec<T> {
    apply_filters(&search(items, query), active, registry)
}
