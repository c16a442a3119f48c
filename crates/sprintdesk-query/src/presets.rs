//! Filter presets produced by clicking a dashboard chart bucket.
//!
//! Issue presets exclude closed work unless the click named a status.

use sprintdesk_model::{EntityId, IssueStatus, Project, User};

use crate::filter::{ActiveFilters, FilterSelection, FilterValue};

/// Which assignee bucket was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeBucket {
    User(EntityId),
    Unassigned,
}

impl From<AssigneeBucket> for FilterValue {
    fn from(value: AssigneeBucket) -> Self {
        match value {
            AssigneeBucket::User(id) => FilterValue::Number(id),
            AssigneeBucket::Unassigned => FilterValue::text(crate::registry::UNASSIGNED),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartClick {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<AssigneeBucket>,
    pub role: Option<String>,
}

fn not_closed() -> FilterSelection {
    FilterSelection::many(IssueStatus::NOT_CLOSED.iter().map(|s| s.as_str()))
}

pub fn issues_page(click: &ChartClick) -> ActiveFilters {
    let mut filters = ActiveFilters::new();
    match &click.status {
        Some(status) => filters.set("status", FilterSelection::many([status.as_str()])),
        None => filters.set("status", not_closed()),
    }
    if let Some(priority) = &click.priority {
        filters.set("priority", FilterSelection::many([priority.as_str()]));
    }
    if let Some(assignee) = click.assignee {
        filters.set("assignee", FilterSelection::many([FilterValue::from(assignee)]));
    }
    filters
}

pub fn project_details(click: &ChartClick) -> ActiveFilters {
    let mut filters = ActiveFilters::new();
    if let Some(AssigneeBucket::User(id)) = click.assignee {
        filters.set("assignee", FilterSelection::many([FilterValue::Number(id)]));
    }
    match &click.status {
        Some(status) => filters.set("status", FilterSelection::many([status.as_str()])),
        None => filters.set("status", not_closed()),
    }
    filters
}

pub fn users_page(click: &ChartClick) -> ActiveFilters {
    let mut filters = ActiveFilters::new();
    if let Some(role) = &click.role {
        filters.set("role", FilterSelection::many([role.as_str()]));
    }
    filters
}

pub fn projects_page(click: &ChartClick) -> ActiveFilters {
    let mut filters = ActiveFilters::new();
    if let Some(status) = &click.status {
        filters.set("status", FilterSelection::many([status.as_str()]));
    }
    filters
}

pub fn project_id_by_name(name: &str, projects: &[Project]) -> Option<EntityId> {
    projects.iter().find(|p| p.name == name).map(|p| p.id)
}

/// Accepts chart labels (`@ada`) as well as bare usernames.
pub fn user_id_by_username(username: &str, users: &[User]) -> Option<EntityId> {
    let clean = username.strip_prefix('@').unwrap_or(username);
    users.iter().find(|u| u.username == clean).map(|u| u.id)
}
