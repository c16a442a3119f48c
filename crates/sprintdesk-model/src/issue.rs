//! Issue type: the primary work item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::enums::{IssuePriority, IssueStatus};
use crate::patch::Patch;
use crate::project::ProjectSummary;
use crate::user::UserSummary;

/// An issue as returned by the issues endpoints.
///
/// `assignee_id` is `None` for unassigned issues; the `"unassigned"` filter
/// sentinel keys off this field, not off `assignee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    // ── Core identification ──
    pub id: EntityId,
    pub project_id: EntityId,

    // ── Content ──
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,

    // ── Status & workflow ──
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub priority: IssuePriority,
    /// Estimated effort in hours.
    #[serde(default)]
    pub time_estimate: Option<i64>,

    // ── Assignment ──
    #[serde(default)]
    pub author_id: Option<EntityId>,
    #[serde(default)]
    pub assignee_id: Option<EntityId>,
    #[serde(default)]
    pub closed_by: Option<EntityId>,

    // ── Timestamps ──
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::option")]
    pub closed_at: Option<DateTime<Utc>>,

    // ── Embedded references ──
    #[serde(default)]
    pub author: Option<UserSummary>,
    #[serde(default)]
    pub assignee: Option<UserSummary>,
    pub project: ProjectSummary,
}

impl Issue {
    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    pub fn is_unassigned(&self) -> bool {
        self.assignee_id.is_none()
    }
}

/// Minimal issue row embedded in project payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub priority: IssuePriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCreate {
    pub project_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub priority: IssuePriority,
    pub assignee_id: Option<EntityId>,
    pub time_estimate: Option<i64>,
}

/// Partial update of an issue.
///
/// Nullable columns use [`Patch`] so that "clear the assignee" and
/// "leave the assignee alone" stay distinguishable on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<IssuePriority>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub assignee_id: Patch<EntityId>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub time_estimate: Patch<i64>,
}

impl IssueUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn status(status: IssueStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn priority(priority: IssuePriority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// An empty description clears the column.
    pub fn description(description: &str) -> Self {
        let description = if description.is_empty() {
            Patch::Clear
        } else {
            Patch::Set(description.to_string())
        };
        Self {
            description,
            ..Self::default()
        }
    }

    pub fn assignee(assignee_id: Option<EntityId>) -> Self {
        Self {
            assignee_id: Patch::from_option(assignee_id),
            ..Self::default()
        }
    }

    pub fn time_estimate(hours: Option<i64>) -> Self {
        Self {
            time_estimate: Patch::from_option(hours),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ISSUE_JSON: &str = r#"{
        "id": 11,
        "title": "Fix bug",
        "description": null,
        "status": "In Progress",
        "priority": "High",
        "time_estimate": 3,
        "project_id": 1,
        "author_id": 2,
        "assignee_id": null,
        "closed_by": null,
        "created_at": "2025-05-01T09:00:00.000001",
        "updated_at": null,
        "closed_at": null,
        "author": {"id": 2, "username": "pm", "firstname": "Pat", "lastname": "Moss"},
        "assignee": null,
        "project": {"id": 1, "name": "Apollo", "status": "Active"},
        "comments": []
    }"#;

    #[test]
    fn issue_parses_server_shape() {
        let issue: Issue = serde_json::from_str(ISSUE_JSON).expect("must parse issue");
        assert_eq!(issue.status, IssueStatus::InProgress);
        assert_eq!(issue.priority, IssuePriority::High);
        assert!(issue.is_unassigned());
        assert!(!issue.is_closed());
        assert_eq!(issue.project.name, "Apollo");
    }

    #[test]
    fn update_distinguishes_clear_from_keep() {
        let clear = serde_json::to_value(IssueUpdate::assignee(None)).expect("serialize");
        assert_eq!(clear, json!({ "assignee_id": null }));

        let set = serde_json::to_value(IssueUpdate::assignee(Some(4))).expect("serialize");
        assert_eq!(set, json!({ "assignee_id": 4 }));

        let keep = serde_json::to_value(IssueUpdate::title("New")).expect("serialize");
        assert_eq!(keep, json!({ "title": "New" }));
    }

    #[test]
    fn empty_description_clears() {
        let value = serde_json::to_value(IssueUpdate::description("")).expect("serialize");
        assert_eq!(value, json!({ "description": null }));
    }
}
