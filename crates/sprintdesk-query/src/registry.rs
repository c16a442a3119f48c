//! Per-entity predicate registries.
//!
//! A registry maps a filter key to a pure `(item, value) -> bool` check of one
//! item field against one scalar. Lookups of unregistered keys return `None`;
//! the engine treats that as "matches everything".

use sprintdesk_model::{Issue, Project, User};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::filter::FilterValue;

/// Sentinel value of the issue `assignee` key selecting issues with no assignee.
pub const UNASSIGNED: &str = "unassigned";

pub type Predicate<T> = Arc<dyn Fn(&T, &FilterValue) -> bool + Send + Sync>;

pub struct PredicateRegistry<T> {
    entries: BTreeMap<String, Predicate<T>>,
}

impl<T> Clone for PredicateRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> Default for PredicateRegistry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> fmt::Debug for PredicateRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> PredicateRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the predicate for `key`.
    pub fn with<F>(mut self, key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T, &FilterValue) -> bool + Send + Sync + 'static,
    {
        self.entries.insert(key.into(), Arc::new(predicate));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Predicate<T>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn text_eq(label: &str, value: &FilterValue) -> bool {
    value.as_text() == Some(label)
}

fn id_eq(id: i64, value: &FilterValue) -> bool {
    value.as_id() == Some(id)
}

/// Keys: `project`, `status`, `priority`, `assignee`, `author`.
pub fn issue_registry() -> PredicateRegistry<Issue> {
    PredicateRegistry::new()
        .with("project", |issue: &Issue, v| id_eq(issue.project_id, v))
        .with("status", |issue: &Issue, v| {
            text_eq(issue.status.as_str(), v)
        })
        .with("priority", |issue: &Issue, v| {
            text_eq(issue.priority.as_str(), v)
        })
        .with("assignee", |issue: &Issue, v| {
            if v.as_text() == Some(UNASSIGNED) {
                issue.assignee_id.is_none()
            } else {
                issue.assignee_id.is_some_and(|id| id_eq(id, v))
            }
        })
        .with("author", |issue: &Issue, v| {
            issue.author_id.is_some_and(|id| id_eq(id, v))
        })
}

/// Keys: `status`, `creator`.
pub fn project_registry() -> PredicateRegistry<Project> {
    PredicateRegistry::new()
        .with("status", |project: &Project, v| {
            text_eq(project.status.as_str(), v)
        })
        .with("creator", |project: &Project, v| id_eq(project.creator.id, v))
}

/// Keys: `role`, `active` (`"active"` / `"inactive"`).
pub fn user_registry() -> PredicateRegistry<User> {
    PredicateRegistry::new()
        .with("role", |user: &User, v| text_eq(user.role.as_str(), v))
        .with("active", |user: &User, v| match v.as_text() {
            Some("active") => user.is_active,
            Some("inactive") => !user.is_active,
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::issue;

    #[test]
    fn unassigned_sentinel_matches_null_assignee_only() {
        let registry = issue_registry();
        let assignee = registry.get("assignee").expect("assignee registered");

        let unassigned = issue(1, "Open", "Low", None);
        let assigned = issue(2, "Open", "Low", Some(5));

        let sentinel = FilterValue::text(UNASSIGNED);
        assert!(assignee(&unassigned, &sentinel));
        assert!(!assignee(&assigned, &sentinel));

        assert!(assignee(&assigned, &FilterValue::Number(5)));
        assert!(assignee(&assigned, &FilterValue::text("5")));
        assert!(!assignee(&unassigned, &FilterValue::Number(5)));
    }

    #[test]
    fn enum_keys_compare_wire_labels() {
        let registry = issue_registry();
        let status = registry.get("status").expect("status registered");
        let row = issue(1, "In Progress", "High", None);

        assert!(status(&row, &FilterValue::text("In Progress")));
        assert!(!status(&row, &FilterValue::text("in progress")));
        assert!(!status(&row, &FilterValue::Number(1)));
    }

    #[test]
    fn registries_expose_expected_keys() {
        assert_eq!(
            issue_registry().keys().collect::<Vec<_>>(),
            vec!["assignee", "author", "priority", "project", "status"]
        );
        assert_eq!(
            project_registry().keys().collect::<Vec<_>>(),
            vec!["creator", "status"]
        );
        assert!(user_registry().contains("role"));
        assert!(!user_registry().contains("priority"));
    }
}
