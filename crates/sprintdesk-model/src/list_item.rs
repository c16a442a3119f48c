//! Tagged union for generic list rendering.
//!
//! Rows carry an explicit `type` discriminant. Consumers dispatch with an
//! exhaustive `match` instead of guessing the shape from which fields are
//! present (projects and users both lack `priority`, for example).

use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::issue::Issue;
use crate::project::Project;
use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ListItem {
    Project(Project),
    Issue(Issue),
    #[serde(alias = "member")]
    User(User),
}

/// Discriminant of a [`ListItem`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListItemKind {
    Project,
    Issue,
    User,
}

impl ListItem {
    pub fn kind(&self) -> ListItemKind {
        match self {
            ListItem::Project(_) => ListItemKind::Project,
            ListItem::Issue(_) => ListItemKind::Issue,
            ListItem::User(_) => ListItemKind::User,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            ListItem::Project(p) => p.id,
            ListItem::Issue(i) => i.id,
            ListItem::User(u) => u.id,
        }
    }
}

impl From<Project> for ListItem {
    fn from(value: Project) -> Self {
        ListItem::Project(value)
    }
}

impl From<Issue> for ListItem {
    fn from(value: Issue) -> Self {
        ListItem::Issue(value)
    }
}

impl From<User> for ListItem {
    fn from(value: User) -> Self {
        ListItem::User(value)
    }
}
