//! Dashboard chart projections.
//!
//! Each projection yields `{name, value}` buckets ready for a chart. Enum
//! breakdowns follow canonical enum order and drop empty buckets; per-project
//! and per-member breakdowns keep every bucket so idle entries stay visible.

use serde::{Deserialize, Serialize};
use sprintdesk_model::{
    Issue, IssuePriority, IssueStatus, Project, ProjectStatus, User, UserRole, UserSummary,
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub name: String,
    pub value: usize,
}

impl ChartDatum {
    fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

pub fn active_issues(issues: &[Issue]) -> impl Iterator<Item = &Issue> {
    issues.iter().filter(|i| !i.is_closed())
}

pub fn active_projects(projects: &[Project]) -> impl Iterator<Item = &Project> {
    projects.iter().filter(|p| p.status == ProjectStatus::Active)
}

fn enum_breakdown<E, I>(all: &[E], label: fn(E) -> &'static str, values: I) -> Vec<ChartDatum>
where
    E: Copy + PartialEq,
    I: IntoIterator<Item = E>,
{
    let mut counts = vec![0usize; all.len()];
    for value in values {
        if let Some(pos) = all.iter().position(|v| *v == value) {
            counts[pos] += 1;
        }
    }
    all.iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(v, n)| ChartDatum::new(label(*v), n))
        .collect()
}

/// Status breakdown of non-closed issues.
pub fn issue_status_chart(issues: &[Issue]) -> Vec<ChartDatum> {
    enum_breakdown(
        IssueStatus::ALL,
        IssueStatus::as_str,
        active_issues(issues).map(|i| i.status),
    )
}

/// Priority breakdown of non-closed issues.
pub fn issue_priority_chart(issues: &[Issue]) -> Vec<ChartDatum> {
    enum_breakdown(
        IssuePriority::ALL,
        IssuePriority::as_str,
        active_issues(issues).map(|i| i.priority),
    )
}

pub fn user_role_chart(users: &[User]) -> Vec<ChartDatum> {
    enum_breakdown(UserRole::ALL, UserRole::as_str, users.iter().map(|u| u.role))
}

pub fn project_status_chart(projects: &[Project]) -> Vec<ChartDatum> {
    enum_breakdown(
        ProjectStatus::ALL,
        ProjectStatus::as_str,
        projects.iter().map(|p| p.status),
    )
}

/// Non-closed issues per active project, one bucket per active project.
pub fn issues_by_project_chart(issues: &[Issue], projects: &[Project]) -> Vec<ChartDatum> {
    let mut buckets: Vec<ChartDatum> = Vec::new();
    for project in active_projects(projects) {
        if !buckets.iter().any(|b| b.name == project.name) {
            buckets.push(ChartDatum::new(project.name.clone(), 0));
        }
    }
    for issue in active_issues(issues) {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.name == issue.project.name) {
            bucket.value += 1;
        }
    }
    buckets
}

/// Distinct members across all projects, first-seen order.
pub fn team_members(projects: &[Project]) -> Vec<UserSummary> {
    let mut seen = BTreeSet::new();
    projects
        .iter()
        .flat_map(|p| p.members.iter())
        .filter(|m| seen.insert(m.id))
        .cloned()
        .collect()
}

/// Non-closed issues per member (`@username`), plus `Unassigned` when any.
///
/// Issues assigned to someone outside `members` are not counted.
pub fn team_workload_chart(issues: &[Issue], members: &[UserSummary]) -> Vec<ChartDatum> {
    let mut buckets: Vec<ChartDatum> = Vec::new();
    for member in members {
        let handle = member.handle();
        if !buckets.iter().any(|b| b.name == handle) {
            buckets.push(ChartDatum::new(handle, 0));
        }
    }

    let mut unassigned = 0usize;
    for issue in active_issues(issues) {
        match &issue.assignee {
            Some(assignee) => {
                let handle = assignee.handle();
                if let Some(bucket) = buckets.iter_mut().find(|b| b.name == handle) {
                    bucket.value += 1;
                }
            }
            None => unassigned += 1,
        }
    }

    if unassigned > 0 {
        buckets.push(ChartDatum::new("Unassigned", unassigned));
    }
    buckets
}
