//! Active filter state: what the user currently has selected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One selectable filter value.
///
/// Entity ids travel as numbers, enum-valued keys as their wire labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(i64),
    Text(String),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            FilterValue::Number(_) => None,
        }
    }

    /// Numeric reading of the value; numeric strings count.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Parse a command-line token: integers become `Number`, anything else `Text`.
    pub fn parse_loose(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => FilterValue::Number(n),
            Err(_) => FilterValue::Text(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

/// Selection under one filter key: a scalar (single-select) or an ordered
/// list of scalars (multi-select).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterSelection {
    One(FilterValue),
    Many(Vec<FilterValue>),
}

impl FilterSelection {
    pub fn many<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        FilterSelection::Many(values.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[FilterValue] {
        match self {
            FilterSelection::One(v) => std::slice::from_ref(v),
            FilterSelection::Many(vs) => vs,
        }
    }

    pub fn contains(&self, value: &FilterValue) -> bool {
        self.values().contains(value)
    }
}

impl From<FilterValue> for FilterSelection {
    fn from(value: FilterValue) -> Self {
        FilterSelection::One(value)
    }
}

/// Current filter selection for one list view.
///
/// Keys are added or removed wholesale; a key's selection is never edited
/// in place. Toggling the last value out of a multi-select removes the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters(BTreeMap<String, FilterSelection>);

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&FilterSelection> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterSelection)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Replace the selection under `key`.
    pub fn set(&mut self, key: impl Into<String>, selection: impl Into<FilterSelection>) {
        self.0.insert(key.into(), selection.into());
    }

    /// Builder form of [`ActiveFilters::set`].
    pub fn with(mut self, key: impl Into<String>, selection: impl Into<FilterSelection>) -> Self {
        self.set(key, selection);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterSelection> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Single-select click: selecting the active value deselects it.
    pub fn toggle_single(&mut self, key: &str, value: FilterValue) {
        let already = matches!(self.0.get(key), Some(FilterSelection::One(v)) if *v == value);
        if already {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), FilterSelection::One(value));
        }
    }

    /// Multi-select click: add the value if absent, drop it if present.
    pub fn toggle_multi(&mut self, key: &str, value: FilterValue) {
        let mut values = match self.0.get(key) {
            Some(FilterSelection::Many(vs)) => vs.clone(),
            _ => Vec::new(),
        };
        if let Some(pos) = values.iter().position(|v| *v == value) {
            values.remove(pos);
        } else {
            values.push(value);
        }

        if values.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), FilterSelection::Many(values));
        }
    }
}

impl<K: Into<String>> FromIterator<(K, FilterSelection)> for ActiveFilters {
    fn from_iter<I: IntoIterator<Item = (K, FilterSelection)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
