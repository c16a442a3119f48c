//! One rendering contract for every list row.

use serde::Serialize;
use sprintdesk_model::{
    EntityId, Issue, IssuePriority, IssueStatus, ListItem, ListItemKind, Project, ProjectStatus,
    User, UserRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Blue,
    Yellow,
    Purple,
    Green,
    Orange,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub tone: BadgeTone,
}

impl Badge {
    fn new(text: &str, tone: BadgeTone) -> Self {
        Self {
            text: text.to_string(),
            tone,
        }
    }
}

pub fn status_tone(status: IssueStatus) -> BadgeTone {
    match status {
        IssueStatus::Open => BadgeTone::Blue,
        IssueStatus::InProgress => BadgeTone::Yellow,
        IssueStatus::ReviewReady => BadgeTone::Purple,
        IssueStatus::Closed => BadgeTone::Green,
        IssueStatus::Blocked => BadgeTone::Red,
    }
}

pub fn priority_tone(priority: IssuePriority) -> BadgeTone {
    match priority {
        IssuePriority::Critical => BadgeTone::Red,
        IssuePriority::High => BadgeTone::Orange,
        IssuePriority::Medium => BadgeTone::Yellow,
        IssuePriority::Low => BadgeTone::Green,
    }
}

pub fn project_status_tone(status: ProjectStatus) -> BadgeTone {
    match status {
        ProjectStatus::Active => BadgeTone::Green,
        ProjectStatus::Completed => BadgeTone::Blue,
        ProjectStatus::OnHold => BadgeTone::Yellow,
        ProjectStatus::Cancelled => BadgeTone::Red,
    }
}

pub fn role_tone(role: UserRole) -> BadgeTone {
    match role {
        UserRole::Admin => BadgeTone::Red,
        UserRole::ProjectManager => BadgeTone::Blue,
        UserRole::Contributor => BadgeTone::Green,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCard {
    pub kind: ListItemKind,
    pub id: EntityId,
    pub title: String,
    pub badges: Vec<Badge>,
    pub details: Vec<String>,
    /// Tooltip of the row's remove action.
    pub remove_hint: String,
}

impl ListCard {
    /// `title [badge] [badge]  detail • detail`.
    pub fn render_line(&self) -> String {
        let mut line = self.title.clone();
        for badge in &self.badges {
            line.push_str(&format!(" [{}]", badge.text));
        }
        if !self.details.is_empty() {
            line.push_str("  ");
            line.push_str(&self.details.join(" • "));
        }
        line
    }
}

impl From<&ListItem> for ListCard {
    fn from(item: &ListItem) -> Self {
        match item {
            ListItem::Issue(issue) => issue_card(issue),
            ListItem::Project(project) => project_card(project),
            ListItem::User(user) => member_card(user),
        }
    }
}

pub fn issue_card(issue: &Issue) -> ListCard {
    let author = issue
        .author
        .as_ref()
        .map(|a| a.full_name())
        .unwrap_or_else(|| "Unknown".to_string());
    let assignment = match &issue.assignee {
        Some(assignee) => format!("Assigned to {}", assignee.full_name()),
        None => "Unassigned".to_string(),
    };
    ListCard {
        kind: ListItemKind::Issue,
        id: issue.id,
        title: issue.title.clone(),
        badges: vec![
            Badge::new(issue.priority.as_str(), priority_tone(issue.priority)),
            Badge::new(issue.status.as_str(), status_tone(issue.status)),
        ],
        details: vec![
            format!("Created by {author}"),
            assignment,
            issue.created_at.format("%Y-%m-%d").to_string(),
        ],
        remove_hint: format!("Delete issue: {}", issue.title),
    }
}

pub fn project_card(project: &Project) -> ListCard {
    let open = project
        .issues
        .iter()
        .filter(|i| {
            matches!(
                i.status,
                IssueStatus::Open | IssueStatus::InProgress | IssueStatus::ReviewReady
            )
        })
        .count();
    ListCard {
        kind: ListItemKind::Project,
        id: project.id,
        title: project.name.clone(),
        badges: vec![Badge::new(
            project.status.as_str(),
            project_status_tone(project.status),
        )],
        details: vec![
            format!("{open} open issues"),
            format!("{} members", project.members.len()),
            format!("Created by {}", project.creator.full_name()),
            project.created_at.format("%Y-%m-%d").to_string(),
        ],
        remove_hint: format!("Delete project: {}", project.name),
    }
}

pub fn member_card(user: &User) -> ListCard {
    let mut details = vec![user.email.clone()];
    if let Some(title) = user.title.as_deref().filter(|t| !t.is_empty()) {
        details.push(title.to_string());
    }
    details.push(format!("@{}", user.username));
    ListCard {
        kind: ListItemKind::User,
        id: user.id,
        title: user.full_name(),
        badges: vec![Badge::new(user.role.as_str(), role_tone(user.role))],
        details,
        remove_hint: format!("Remove {} from project", user.full_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(assignee: Option<serde_json::Value>) -> Issue {
        serde_json::from_value(json!({
            "id": 4,
            "project_id": 1,
            "title": "Fix login",
            "status": "In Progress",
            "priority": "Critical",
            "author_id": 2,
            "assignee_id": assignee.as_ref().map(|a| a["id"].clone()),
            "created_at": "2025-02-14T08:00:00",
            "author": {"id": 2, "username": "ada", "firstname": "Ada", "lastname": "Lovelace"},
            "assignee": assignee,
            "project": {"id": 1, "name": "Apollo", "status": "Active"}
        }))
        .expect("issue fixture")
    }

    #[test]
    fn issue_card_shows_badges_and_assignment() {
        let card = ListCard::from(&ListItem::Issue(issue(None)));
        assert_eq!(card.kind, ListItemKind::Issue);
        assert_eq!(
            card.badges,
            vec![
                Badge::new("Critical", BadgeTone::Red),
                Badge::new("In Progress", BadgeTone::Yellow),
            ]
        );
        assert_eq!(
            card.details,
            vec!["Created by Ada Lovelace", "Unassigned", "2025-02-14"]
        );
        assert_eq!(
            card.render_line(),
            "Fix login [Critical] [In Progress]  Created by Ada Lovelace • Unassigned • 2025-02-14"
        );

        let assigned = issue_card(&issue(Some(json!({
            "id": 9, "username": "grace", "firstname": "Grace", "lastname": "Hopper"
        }))));
        assert_eq!(assigned.details[1], "Assigned to Grace Hopper");
    }

    #[test]
    fn project_card_counts_only_open_work() {
        let project: Project = serde_json::from_value(json!({
            "id": 1,
            "name": "Apollo",
            "status": "On Hold",
            "created_at": "2025-01-05T12:00:00Z",
            "creator": {"id": 2, "username": "ada", "firstname": "Ada", "lastname": "Lovelace"},
            "members": [
                {"id": 2, "username": "ada", "firstname": "Ada", "lastname": "Lovelace"},
                {"id": 9, "username": "grace", "firstname": "Grace", "lastname": "Hopper"}
            ],
            "issues": [
                {"id": 1, "title": "a", "status": "Open", "priority": "Low"},
                {"id": 2, "title": "b", "status": "Review Ready", "priority": "Low"},
                {"id": 3, "title": "c", "status": "Blocked", "priority": "Low"},
                {"id": 4, "title": "d", "status": "Closed", "priority": "Low"}
            ]
        }))
        .expect("project fixture");

        let card = ListCard::from(&ListItem::Project(project));
        assert_eq!(card.badges, vec![Badge::new("On Hold", BadgeTone::Yellow)]);
        assert_eq!(card.details[0], "2 open issues");
        assert_eq!(card.details[1], "2 members");
        assert_eq!(card.remove_hint, "Delete project: Apollo");
    }

    #[test]
    fn member_card_skips_missing_title() {
        let user = User {
            id: 9,
            username: "grace".to_string(),
            firstname: "Grace".to_string(),
            lastname: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            title: None,
            role: UserRole::ProjectManager,
            is_active: true,
        };
        let card = member_card(&user);
        assert_eq!(card.title, "Grace Hopper");
        assert_eq!(card.details, vec!["grace@example.com", "@grace"]);
        assert_eq!(card.badges[0].tone, BadgeTone::Blue);
        assert_eq!(card.remove_hint, "Remove Grace Hopper from project");
    }
}
