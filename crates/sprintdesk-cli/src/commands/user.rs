use crate::cli::UserCommands;
use crate::support::{Remote, enum_labels_or_exit, exit_with, print_json, set_many};
use serde_json::json;
use sprintdesk_model::{User, UserRole};
use sprintdesk_query::{ActiveFilters, FilterSelection, configs};
use sprintdesk_ux::{CancellationToken, users_page};

pub fn run(command: UserCommands, config: Option<&str>) {
    let remote = Remote::connect_or_exit(config);
    match command {
        UserCommands::List {
            role,
            active,
            inactive,
            search,
            json,
        } => run_list(&remote, role, active, inactive, search, json),

        UserCommands::Show { user, json } => {
            let id = remote.user_id_or_exit(&user, &mut None);
            let user = remote.call(remote.client().user(id));
            emit_user("user.show", &user, json);
        }

        UserCommands::Activate { user } => {
            let id = remote.user_id_or_exit(&user, &mut None);
            let user = remote.call(remote.client().activate_user(id));
            println!("Activated {} (@{})", user.full_name(), user.username);
        }

        UserCommands::Deactivate { user } => {
            let id = remote.user_id_or_exit(&user, &mut None);
            let user = remote.call(remote.client().deactivate_user(id));
            println!("Deactivated {} (@{})", user.full_name(), user.username);
        }

        UserCommands::Delete { user } => {
            let id = remote.user_id_or_exit(&user, &mut None);
            remote.call(remote.client().delete_user(id));
            println!("Deleted user {id}");
        }
    }
}

fn run_list(
    remote: &Remote,
    role: Vec<String>,
    active: bool,
    inactive: bool,
    search: Option<String>,
    json_output: bool,
) {
    let mut filters = ActiveFilters::new();
    set_many(&mut filters, "role", enum_labels_or_exit(&role, UserRole::as_str));
    if active {
        filters.set("active", FilterSelection::One("active".into()));
    } else if inactive {
        filters.set("active", FilterSelection::One("inactive".into()));
    }

    let mut page = users_page(remote.client().clone(), CancellationToken::new());
    remote.runtime().block_on(page.fetch.refetch());
    if let Some(message) = page.fetch.error() {
        exit_with(message);
    }
    page.toolbar.set_filters(filters);
    if let Some(search) = &search {
        page.toolbar.set_search(search.as_str());
    }

    let rows = page.visible();
    if json_output {
        print_json(&json!({
            "action": "user.list",
            "total": page.rows().len(),
            "count": rows.len(),
            "filters": page.toolbar.filters(),
            "search": page.toolbar.search(),
            "items": rows
        }));
        return;
    }

    let resolved = remote.resolve_options(configs::users_page());
    println!(
        "sprintdesk user list\n  Count: {} of {}",
        rows.len(),
        page.rows().len()
    );
    for badge in page.toolbar.badges(&resolved) {
        println!("  Filter: {}", badge.text);
    }
    for user in &rows {
        let state = if user.is_active { "" } else { " (inactive)" };
        println!("  - #{} @{} {} [{}]{state}", user.id, user.username, user.full_name(), user.role);
    }
}

pub(crate) fn emit_user(action: &str, user: &User, json_output: bool) {
    if json_output {
        print_json(&json!({
            "action": action,
            "user": user
        }));
        return;
    }
    println!("#{} {} (@{})", user.id, user.full_name(), user.username);
    println!("  Email: {}", user.email);
    if let Some(title) = user.title.as_deref().filter(|t| !t.is_empty()) {
        println!("  Title: {title}");
    }
    println!("  Role: {}", user.role);
    println!("  Active: {}", user.is_active);
}
