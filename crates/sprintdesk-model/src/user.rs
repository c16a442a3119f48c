//! User accounts.

use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::enums::UserRole;

/// A SprintDesk account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
        }
    }
}

/// Minimal user reference embedded in projects, issues and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: EntityId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    /// `@username`, the label used by workload charts.
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}

/// Payload for self-registration and admin user creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistration {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Partial update of a user. Unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_parses_server_shape() {
        let raw = r#"{
            "id": 7,
            "username": "ada",
            "firstname": "Ada",
            "lastname": "Lovelace",
            "email": "ada@example.com",
            "title": null,
            "role": "Project Manager",
            "is_active": false
        }"#;

        let user: User = serde_json::from_str(raw).expect("must parse user");
        assert_eq!(user.role, UserRole::ProjectManager);
        assert!(!user.is_active);
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(user.summary().handle(), "@ada");
    }

    #[test]
    fn user_update_omits_unset_fields() {
        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..UserUpdate::default()
        };
        let value = serde_json::to_value(update).expect("serialize");
        assert_eq!(value, serde_json::json!({ "email": "new@example.com" }));
    }
}
