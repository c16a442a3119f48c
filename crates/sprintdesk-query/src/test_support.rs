//! Row builders shared by unit tests.

use chrono::{TimeZone, Utc};
use sprintdesk_model::{
    EntityId, Issue, IssuePriority, IssueStatus, Project, ProjectStatus, ProjectSummary, User,
    UserRole, UserSummary,
};

pub fn summary(id: EntityId, username: &str) -> UserSummary {
    UserSummary {
        id,
        username: username.to_string(),
        firstname: format!("First{id}"),
        lastname: format!("Last{id}"),
    }
}

pub fn issue(id: EntityId, status: &str, priority: &str, assignee_id: Option<EntityId>) -> Issue {
    let status: IssueStatus = status.parse().expect("test status");
    let priority: IssuePriority = priority.parse().expect("test priority");
    Issue {
        id,
        project_id: 1,
        title: format!("Issue {id}"),
        description: None,
        status,
        priority,
        time_estimate: None,
        author_id: Some(100),
        assignee_id,
        closed_by: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        updated_at: None,
        closed_at: None,
        author: Some(summary(100, "author")),
        assignee: assignee_id.map(|id| summary(id, &format!("user{id}"))),
        project: ProjectSummary {
            id: 1,
            name: "Apollo".to_string(),
            status: ProjectStatus::Active,
        },
    }
}

pub fn project(id: EntityId, name: &str, status: &str, creator: EntityId) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: None,
        status: status.parse().expect("test project status"),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        creator: summary(creator, &format!("user{creator}")),
        members: Vec::new(),
        issues: Vec::new(),
    }
}

pub fn user(id: EntityId, role: &str, is_active: bool) -> User {
    let role: UserRole = role.parse().expect("test role");
    User {
        id,
        username: format!("user{id}"),
        firstname: format!("First{id}"),
        lastname: format!("Last{id}"),
        email: format!("user{id}@example.com"),
        title: None,
        role,
        is_active,
    }
}
