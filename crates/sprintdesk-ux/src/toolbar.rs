//! List-page toolbar state: search text plus the active filter selection.

use serde::Serialize;
use sprintdesk_query::{
    ActiveFilters, FilterSelection, FilterValue, PredicateRegistry, ResolvedConfig, Searchable,
    SelectionType, search_and_filter,
};

/// Badges list at most this many option labels before collapsing to a count.
const MAX_LISTED_VALUES: usize = 3;

/// One removable chip under the toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterBadge {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolbarState {
    search: String,
    filters: ActiveFilters,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toolbar opened with a preset selection (e.g. from a chart click).
    pub fn with_filters(filters: ActiveFilters) -> Self {
        Self {
            search: String::new(),
            filters,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: ActiveFilters) {
        self.filters = filters;
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Click an option in the filter dropdown.
    pub fn toggle(&mut self, selection: SelectionType, key: &str, value: impl Into<FilterValue>) {
        match selection {
            SelectionType::Single => self.filters.toggle_single(key, value.into()),
            SelectionType::Multi => self.filters.toggle_multi(key, value.into()),
        }
    }

    /// Toggle using the selection type the page config declares for `key`.
    /// Keys the config does not know are ignored.
    pub fn toggle_in(&mut self, config: &ResolvedConfig, key: &str, value: impl Into<FilterValue>) {
        if let Some(filter) = config.filter(key) {
            let selection = filter.selection;
            self.toggle(selection, key, value);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.filters.remove(key);
    }

    /// Drop every filter; the search text stays.
    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    /// Badge per active key, in config order, then keys the config lacks.
    pub fn badges(&self, config: &ResolvedConfig) -> Vec<FilterBadge> {
        let mut keys: Vec<&str> = config
            .filters
            .iter()
            .map(|f| f.key.as_str())
            .filter(|k| self.filters.get(k).is_some())
            .collect();
        for key in self.filters.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        keys.into_iter()
            .filter_map(|key| {
                let selection = self.filters.get(key)?;
                Some(FilterBadge {
                    key: key.to_string(),
                    text: badge_text(config, key, selection),
                })
            })
            .collect()
    }

    /// Rows the list shows: search first, then filters.
    pub fn visible<T: Searchable + Clone>(&self, items: &[T], registry: &PredicateRegistry<T>) -> Vec<T> {
        search_and_filter(items, &self.search, &self.filters, registry)
    }
}

fn badge_text(config: &ResolvedConfig, key: &str, selection: &FilterSelection) -> String {
    let Some(filter) = config.filter(key) else {
        let raw: Vec<String> = selection.values().iter().map(ToString::to_string).collect();
        return format!("{key}: {}", raw.join(","));
    };

    let label = |value: &FilterValue| config.option_label(key, value);
    match selection {
        FilterSelection::One(value) => format!("{}: {}", filter.label, label(value)),
        FilterSelection::Many(values) if values.len() <= MAX_LISTED_VALUES => {
            let labels: Vec<String> = values.iter().map(label).collect();
            format!("{}: {}", filter.label, labels.join(", "))
        }
        FilterSelection::Many(values) => format!("{}: {} selected", filter.label, values.len()),
    }
}
