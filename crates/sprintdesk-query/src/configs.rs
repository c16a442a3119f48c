//! Page filter configurations and option builders.
//!
//! Configs are rebuilt per page from whatever reference data (projects,
//! users) the page has loaded; dimensions whose data is missing are left out.

use sprintdesk_model::{IssuePriority, IssueStatus, Project, ProjectStatus, User, UserRole};
use std::collections::BTreeSet;

use crate::definition::{FilterConfig, FilterDefinition, FilterOption};
use crate::registry::UNASSIGNED;

fn label_options<E: Copy>(all: &[E], label: fn(E) -> &'static str) -> Vec<FilterOption> {
    all.iter()
        .map(|v| FilterOption::new(label(*v), label(*v)))
        .collect()
}

pub fn project_status_options() -> Vec<FilterOption> {
    label_options(ProjectStatus::ALL, ProjectStatus::as_str)
}

pub fn issue_status_options() -> Vec<FilterOption> {
    label_options(IssueStatus::ALL, IssueStatus::as_str)
}

pub fn issue_priority_options() -> Vec<FilterOption> {
    label_options(IssuePriority::ALL, IssuePriority::as_str)
}

pub fn user_role_options() -> Vec<FilterOption> {
    label_options(UserRole::ALL, UserRole::as_str)
}

pub fn user_activity_options() -> Vec<FilterOption> {
    vec![
        FilterOption::new("active", "Active"),
        FilterOption::new("inactive", "Inactive"),
    ]
}

/// One option per project: id → name.
pub fn project_options(projects: &[Project]) -> Vec<FilterOption> {
    projects
        .iter()
        .map(|p| FilterOption::new(p.id, p.name.clone()))
        .collect()
}

/// One option per user: id → "First Last".
pub fn user_options(users: &[User]) -> Vec<FilterOption> {
    users
        .iter()
        .map(|u| FilterOption::new(u.id, u.full_name()))
        .collect()
}

/// Distinct project creators, in first-seen order.
pub fn creator_options(projects: &[Project]) -> Vec<FilterOption> {
    let mut seen = BTreeSet::new();
    projects
        .iter()
        .filter(|p| seen.insert(p.creator.id))
        .map(|p| FilterOption::new(p.creator.id, p.creator.full_name()))
        .collect()
}

fn assignee_options(users: &[User]) -> Vec<FilterOption> {
    let mut options = vec![FilterOption::new(UNASSIGNED, "Unassigned")];
    options.extend(user_options(users));
    options
}

pub fn projects_page(projects: Option<&[Project]>) -> FilterConfig {
    let mut filters = vec![FilterDefinition::multi(
        "status",
        "Status",
        project_status_options(),
    )];
    if let Some(projects) = projects {
        filters.push(FilterDefinition::multi(
            "creator",
            "Created By",
            creator_options(projects),
        ));
    }
    FilterConfig::new(filters)
}

pub fn issues_page(projects: Option<&[Project]>, users: Option<&[User]>) -> FilterConfig {
    let mut filters = Vec::new();
    if let Some(projects) = projects {
        filters.push(FilterDefinition::multi(
            "project",
            "Project",
            project_options(projects),
        ));
    }
    filters.push(FilterDefinition::multi("status", "Status", issue_status_options()));
    filters.push(FilterDefinition::multi(
        "priority",
        "Priority",
        issue_priority_options(),
    ));
    if let Some(users) = users {
        filters.push(FilterDefinition::multi(
            "assignee",
            "Assignee",
            assignee_options(users),
        ));
        filters.push(FilterDefinition::multi("author", "Author", user_options(users)));
    }
    FilterConfig::new(filters)
}

pub fn project_details_issues(
    assignees: Option<&[User]>,
    authors: Option<&[User]>,
) -> FilterConfig {
    let mut filters = vec![
        FilterDefinition::multi("status", "Status", issue_status_options()),
        FilterDefinition::multi("priority", "Priority", issue_priority_options()),
    ];
    if let Some(assignees) = assignees {
        filters.push(FilterDefinition::multi(
            "assignee",
            "Assignee",
            assignee_options(assignees),
        ));
    }
    if let Some(authors) = authors {
        filters.push(FilterDefinition::multi("author", "Author", user_options(authors)));
    }
    FilterConfig::new(filters)
}

pub fn project_details_members() -> FilterConfig {
    FilterConfig::new(vec![FilterDefinition::multi(
        "role",
        "Role",
        user_role_options(),
    )])
}

pub fn users_page() -> FilterConfig {
    FilterConfig::new(vec![
        FilterDefinition::multi("role", "Role", user_role_options()),
        FilterDefinition::single("active", "Account", user_activity_options()),
    ])
}
