//! # sprintdesk-model
//!
//! Typed view of the SprintDesk REST API.
//!
//! This crate provides:
//! - entity types (`User`, `Project`, `Issue`, `Comment`, `Label`)
//! - closed enums for workflow fields (`IssueStatus`, `IssuePriority`, ...)
//! - request payloads for create/update endpoints
//! - `ListItem`, the tagged union consumed by generic list rendering
//!
//! It intentionally does not talk to the network or filter anything.
//! Those concerns live in `sprintdesk-transport` and `sprintdesk-query`.

pub mod auth;
pub mod comment;
pub mod enums;
pub mod issue;
pub mod label;
pub mod list_item;
pub mod patch;
pub mod project;
pub mod timestamp;
pub mod user;

pub use auth::{LoginRequest, TokenResponse};
pub use comment::{Comment, CommentCreate, CommentUpdate};
pub use enums::{IssuePriority, IssueStatus, ParseEnumError, ProjectStatus, UserRole};
pub use issue::{Issue, IssueCreate, IssueSummary, IssueUpdate};
pub use label::{Label, LabelCreate, LabelUpdate};
pub use list_item::{ListItem, ListItemKind};
pub use patch::Patch;
pub use project::{Project, ProjectCreate, ProjectSummary, ProjectUpdate};
pub use user::{User, UserRegistration, UserSummary, UserUpdate};

/// Numeric primary key used by every SprintDesk entity.
pub type EntityId = i64;
