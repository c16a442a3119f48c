use crate::config::{self, LoadedConfig};
use serde_json::Value;
use sprintdesk_model::{EntityId, Label, Project, User};
use sprintdesk_query::{
    ActiveFilters, FilterConfig, FilterSelection, FilterValue, ResolvedConfig, UNASSIGNED,
    presets,
};
use sprintdesk_transport::{ApiClient, ApiError, FileTokenStore, ReqwestTransport, Session};
use sprintdesk_ux::ErrorSink;
use std::future::Future;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tokio::runtime::Runtime;

pub const PASSWORD_ENV: &str = "SPRINTDESK_PASSWORD";

/// Error surface for inline edits: the same `error: ...` line every command prints.
#[derive(Debug, Default)]
pub struct StderrSink;

impl ErrorSink for StderrSink {
    fn report(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

pub fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn config_or_exit(path: Option<&str>) -> LoadedConfig {
    config::load(path.map(Path::new)).unwrap_or_else(|e| exit_with(e))
}

pub fn parse_or_exit<T>(raw: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().unwrap_or_else(|e| exit_with(e))
}

pub fn password_or_exit(password: Option<String>) -> String {
    password
        .or_else(|| std::env::var(PASSWORD_ENV).ok())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| exit_with(format!("password required (--password or ${PASSWORD_ENV})")))
}

pub fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

/// Tokio runtime plus a client bound to the configured server and token file.
pub struct Remote {
    runtime: Runtime,
    client: ApiClient,
}

impl Remote {
    pub fn connect_or_exit(config_path: Option<&str>) -> Self {
        let loaded = config_or_exit(config_path);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|e| exit_with(format!("failed to create tokio runtime: {e}")));

        let store = Arc::new(FileTokenStore::new(&loaded.config.token_path));
        let session = Session::restore(store).unwrap_or_else(|e| exit_with(e));
        let transport = ReqwestTransport::new(&loaded.config.base_url, loaded.config.timeout())
            .unwrap_or_else(|e| exit_with(e));
        tracing::debug!(base_url = %loaded.config.base_url, "client configured");

        Self {
            runtime,
            client: ApiClient::new(Arc::new(transport), session),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Run one API call to completion; failures print the user message and exit.
    pub fn call<T, F>(&self, future: F) -> T
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.runtime
            .block_on(future)
            .unwrap_or_else(|e| exit_with(e.user_message()))
    }

    /// Filters whose options fail to load come back empty; badges then show raw values.
    pub fn resolve_options(&self, config: FilterConfig) -> ResolvedConfig {
        self.runtime.block_on(config.resolve())
    }

    /// `12`, `@ada`, or `ada` to a user id. Names trigger one users fetch.
    pub fn user_id_or_exit(&self, raw: &str, users: &mut Option<Vec<User>>) -> EntityId {
        if let Ok(id) = raw.trim().parse::<EntityId>() {
            return id;
        }
        let users = users.get_or_insert_with(|| self.call(self.client.users()));
        presets::user_id_by_username(raw.trim(), users)
            .unwrap_or_else(|| exit_with(format!("unknown user: {raw}")))
    }

    pub fn project_id_or_exit(&self, raw: &str, projects: &mut Option<Vec<Project>>) -> EntityId {
        if let Ok(id) = raw.trim().parse::<EntityId>() {
            return id;
        }
        let projects = projects.get_or_insert_with(|| self.call(self.client.projects()));
        presets::project_id_by_name(raw.trim(), projects)
            .unwrap_or_else(|| exit_with(format!("unknown project: {raw}")))
    }

    pub fn label_id_or_exit(&self, raw: &str) -> EntityId {
        if let Ok(id) = raw.trim().parse::<EntityId>() {
            return id;
        }
        let labels: Vec<Label> = self.call(self.client.labels());
        labels
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(raw.trim()))
            .map(|l| l.id)
            .unwrap_or_else(|| exit_with(format!("unknown label: {raw}")))
    }
}

/// Canonical wire labels for a repeatable enum flag, e.g. `in-progress` to `In Progress`.
pub fn enum_labels_or_exit<T>(raw: &[String], label: fn(T) -> &'static str) -> Vec<FilterValue>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.iter()
        .map(|value| FilterValue::text(label(parse_or_exit::<T>(value))))
        .collect()
}

/// Set `key` when at least one value was given.
pub fn set_many(filters: &mut ActiveFilters, key: &str, values: Vec<FilterValue>) {
    if !values.is_empty() {
        filters.set(key, FilterSelection::many(values));
    }
}

/// `unassigned` stays the sentinel; everything else is a user reference.
pub fn assignee_value(remote: &Remote, raw: &str, users: &mut Option<Vec<User>>) -> FilterValue {
    if raw.trim().eq_ignore_ascii_case(UNASSIGNED) {
        FilterValue::text(UNASSIGNED)
    } else {
        FilterValue::Number(remote.user_id_or_exit(raw, users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintdesk_model::IssueStatus;

    #[test]
    fn enum_flags_normalize_to_wire_labels() {
        let values = enum_labels_or_exit::<IssueStatus>(
            &["in-progress".to_string(), "review_ready".to_string()],
            IssueStatus::as_str,
        );
        assert_eq!(
            values,
            vec![
                FilterValue::text("In Progress"),
                FilterValue::text("Review Ready")
            ]
        );
    }

    #[test]
    fn empty_flag_lists_leave_filters_untouched() {
        let mut filters = ActiveFilters::new();
        set_many(&mut filters, "status", Vec::new());
        assert!(filters.is_empty());

        set_many(&mut filters, "priority", vec![FilterValue::text("High")]);
        assert_eq!(
            filters.get("priority"),
            Some(&FilterSelection::many(["High"]))
        );
    }
}
