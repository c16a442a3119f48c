pub mod auth;
pub mod config;
pub mod dashboard;
pub mod issue;
pub mod label;
pub mod project;
pub mod user;
