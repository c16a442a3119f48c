//! Declarative filter definitions.
//!
//! A [`FilterConfig`] lists the filterable dimensions of one page. Options are
//! either fixed or produced asynchronously; async producers are invoked once
//! per [`FilterConfig::resolve`] call and never cached on the definition. A
//! producer that fails leaves only its own filter without options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::apply::matches;
use crate::error::QueryError;
use crate::filter::{ActiveFilters, FilterSelection, FilterValue};
use crate::registry::PredicateRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: FilterValue,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl FilterOption {
    pub fn new(value: impl Into<FilterValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Single,
    Multi,
}

pub type OptionsFuture = Pin<Box<dyn Future<Output = Result<Vec<FilterOption>, QueryError>> + Send>>;

pub type OptionsProducer = Arc<dyn Fn() -> OptionsFuture + Send + Sync>;

#[derive(Clone)]
pub enum OptionSource {
    Static(Vec<FilterOption>),
    Async(OptionsProducer),
}

impl fmt::Debug for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSource::Static(options) => f.debug_tuple("Static").field(options).finish(),
            OptionSource::Async(_) => f.write_str("Async(<producer>)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterDefinition {
    pub key: String,
    pub label: String,
    pub selection: SelectionType,
    pub options: OptionSource,
}

impl FilterDefinition {
    pub fn multi(key: impl Into<String>, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            selection: SelectionType::Multi,
            options: OptionSource::Static(options),
        }
    }

    pub fn single(key: impl Into<String>, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            selection: SelectionType::Single,
            options: OptionSource::Static(options),
        }
    }

    /// Definition whose options come from an async producer.
    pub fn deferred<F, Fut>(
        key: impl Into<String>,
        label: impl Into<String>,
        selection: SelectionType,
        producer: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<FilterOption>, QueryError>> + Send + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            selection,
            options: OptionSource::Async(Arc::new(move || Box::pin(producer()))),
        }
    }

    async fn resolve(&self) -> Result<ResolvedFilter, QueryError> {
        let options = match &self.options {
            OptionSource::Static(options) => options.clone(),
            OptionSource::Async(producer) => producer().await.map_err(|err| {
                QueryError::OptionsUnavailable {
                    key: self.key.clone(),
                    reason: err.to_string(),
                }
            })?,
        };
        Ok(ResolvedFilter {
            key: self.key.clone(),
            label: self.label.clone(),
            selection: self.selection,
            options,
        })
    }
}

/// Ordered filter definitions for one page.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub filters: Vec<FilterDefinition>,
}

impl FilterConfig {
    pub fn new(filters: Vec<FilterDefinition>) -> Self {
        Self { filters }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn definition(&self, key: &str) -> Option<&FilterDefinition> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Materialize every option list for one render pass.
    pub async fn resolve(&self) -> ResolvedConfig {
        let mut filters = Vec::with_capacity(self.filters.len());
        for definition in &self.filters {
            let resolved = match definition.resolve().await {
                Ok(resolved) => resolved,
                Err(err) => {
                    tracing::warn!(
                        key = %definition.key,
                        error = %err,
                        "filter options unavailable"
                    );
                    ResolvedFilter {
                        key: definition.key.clone(),
                        label: definition.label.clone(),
                        selection: definition.selection,
                        options: Vec::new(),
                    }
                }
            };
            filters.push(resolved);
        }
        ResolvedConfig { filters }
    }
}

/// A filter definition with its options materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFilter {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub selection: SelectionType,
    pub options: Vec<FilterOption>,
}

impl ResolvedFilter {
    pub fn option_label(&self, value: &FilterValue) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == *value)
            .map(|o| o.label.as_str())
    }

    /// Fill each option's `count` with how many items its value alone would keep.
    pub fn with_counts<T>(mut self, items: &[T], registry: &PredicateRegistry<T>) -> Self {
        for option in &mut self.options {
            let probe = ActiveFilters::new()
                .with(self.key.clone(), FilterSelection::One(option.value.clone()));
            option.count = Some(items.iter().filter(|i| matches(*i, &probe, registry)).count());
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub filters: Vec<ResolvedFilter>,
}

impl ResolvedConfig {
    pub fn filter(&self, key: &str) -> Option<&ResolvedFilter> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Display label for a selected value, falling back to the raw value.
    pub fn option_label(&self, key: &str, value: &FilterValue) -> String {
        self.filter(key)
            .and_then(|f| f.option_label(value))
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string())
    }

    pub fn with_counts<T>(self, items: &[T], registry: &PredicateRegistry<T>) -> Self {
        Self {
            filters: self
                .filters
                .into_iter()
                .map(|f| f.with_counts(items, registry))
                .collect(),
        }
    }
}
