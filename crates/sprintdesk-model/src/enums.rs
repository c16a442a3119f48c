//! Closed workflow enums.
//!
//! Wire spellings are the human labels the server emits (`"In Progress"`,
//! `"On Hold"`, `"Project Manager"`), so `as_str` doubles as display text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a string does not name a variant of one of the workflow enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in canonical display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire/display label.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            /// Accepts the wire label, case-insensitively, with `-`/`_` standing in for spaces.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize(v.as_str()) == wanted)
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_ascii_lowercase()
}

label_enum! {
    /// Workflow status of an issue.
    IssueStatus, "issue status" {
        Open => "Open",
        InProgress => "In Progress",
        ReviewReady => "Review Ready",
        Closed => "Closed",
        Blocked => "Blocked",
    }
}

label_enum! {
    /// Issue priority, lowest first.
    IssuePriority, "issue priority" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

label_enum! {
    /// Lifecycle status of a project.
    ProjectStatus, "project status" {
        Active => "Active",
        Completed => "Completed",
        OnHold => "On Hold",
        Cancelled => "Cancelled",
    }
}

label_enum! {
    /// Account role. Governs which dashboard a user sees.
    UserRole, "user role" {
        Admin => "Admin",
        ProjectManager => "Project Manager",
        Contributor => "Contributor",
    }
}

impl IssueStatus {
    /// Statuses that still represent outstanding work.
    pub const NOT_CLOSED: &'static [IssueStatus] = &[
        IssueStatus::Open,
        IssueStatus::InProgress,
        IssueStatus::ReviewReady,
        IssueStatus::Blocked,
    ];

    pub fn is_closed(self) -> bool {
        self == IssueStatus::Closed
    }
}

impl Default for IssueStatus {
    fn default() -> Self {
        IssueStatus::Open
    }
}

impl Default for IssuePriority {
    fn default() -> Self {
        IssuePriority::Medium
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Contributor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_labels_round_trip_through_serde() {
        let raw = serde_json::to_string(&IssueStatus::InProgress).expect("serialize");
        assert_eq!(raw, "\"In Progress\"");

        let parsed: ProjectStatus = serde_json::from_str("\"On Hold\"").expect("deserialize");
        assert_eq!(parsed, ProjectStatus::OnHold);
    }

    #[test]
    fn from_str_is_lenient_about_case_and_separators() {
        assert_eq!(
            "review-ready".parse::<IssueStatus>(),
            Ok(IssueStatus::ReviewReady)
        );
        assert_eq!(
            "project_manager".parse::<UserRole>(),
            Ok(UserRole::ProjectManager)
        );
        assert_eq!("HIGH".parse::<IssuePriority>(), Ok(IssuePriority::High));
    }

    #[test]
    fn from_str_reports_unknown_values() {
        let err = "urgent".parse::<IssuePriority>().expect_err("must fail");
        assert_eq!(err.kind, "issue priority");
        assert_eq!(err.to_string(), "unknown issue priority: urgent");
    }

    #[test]
    fn not_closed_excludes_only_closed() {
        assert_eq!(IssueStatus::NOT_CLOSED.len(), IssueStatus::ALL.len() - 1);
        assert!(!IssueStatus::NOT_CLOSED.contains(&IssueStatus::Closed));
    }
}
