use crate::cli::{MemberCommands, ProjectCommands};
use crate::support::{
    Remote, StderrSink, enum_labels_or_exit, exit_with, parse_or_exit, print_json, set_many,
};
use serde_json::json;
use sprintdesk_model::{EntityId, Project, ProjectCreate, ProjectStatus, ProjectUpdate, UserRole};
use sprintdesk_query::{
    ActiveFilters, FilterValue, configs, search_and_filter, user_registry,
};
use sprintdesk_transport::ApiError;
use sprintdesk_ux::list_card::{issue_card, member_card};
use sprintdesk_ux::{
    CancellationToken, InlineEdit, SaveOutcome, ToolbarState, projects_page,
};
use std::sync::Arc;

pub fn run(command: ProjectCommands, config: Option<&str>) {
    let remote = Remote::connect_or_exit(config);
    match command {
        ProjectCommands::List {
            status,
            creator,
            search,
            json,
        } => run_list(&remote, status, creator, search, json),

        ProjectCommands::Show { id, json } => run_show(&remote, id, json),

        ProjectCommands::Create {
            name,
            description,
            status,
            json,
        } => {
            if name.trim().is_empty() {
                exit_with("project name must not be empty");
            }
            let create = ProjectCreate {
                name: name.trim().to_string(),
                description: description.filter(|d| !d.trim().is_empty()),
                status: parse_or_exit(&status),
            };
            let project = remote.call(remote.client().create_project(&create));
            emit_project("project.create", &project, json);
        }

        ProjectCommands::Edit {
            id,
            name,
            description,
            json,
        } => run_edit(&remote, id, name, description, json),

        ProjectCommands::Status { id, status, json } => {
            let update = ProjectUpdate {
                status: Some(parse_or_exit(&status)),
                ..ProjectUpdate::default()
            };
            let project = remote.call(remote.client().update_project(id, &update));
            emit_project("project.status", &project, json);
        }

        ProjectCommands::Delete { id } => {
            remote.call(remote.client().delete_project(id));
            println!("Deleted project {id}");
        }

        ProjectCommands::Member { command } => run_member(&remote, command),
    }
}

fn run_list(
    remote: &Remote,
    status: Vec<String>,
    creator: Vec<String>,
    search: Option<String>,
    json_output: bool,
) {
    let mut users = None;
    let mut filters = ActiveFilters::new();
    set_many(
        &mut filters,
        "status",
        enum_labels_or_exit(&status, ProjectStatus::as_str),
    );
    let creators = creator
        .iter()
        .map(|c| FilterValue::Number(remote.user_id_or_exit(c, &mut users)))
        .collect();
    set_many(&mut filters, "creator", creators);

    let mut page = projects_page(remote.client().clone(), CancellationToken::new());
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
        let items = rows
            .iter()
            .map(|project| {
                json!({
                    "id": project.id,
                    "name": project.name,
                    "status": project.status,
                    "creator": project.creator.username,
                    "memberCount": project.members.len(),
                    "createdAt": project.created_at
                })
            })
            .collect::<Vec<_>>();
        print_json(&json!({
            "action": "project.list",
            "total": page.rows().len(),
            "count": items.len(),
            "filters": page.toolbar.filters(),
            "search": page.toolbar.search(),
            "items": items
        }));
        return;
    }

    let all = page.rows();
    let resolved = remote.resolve_options(configs::projects_page(Some(all.as_slice())));
    println!(
        "sprintdesk project list\n  Count: {} of {}",
        rows.len(),
        all.len()
    );
    for badge in page.toolbar.badges(&resolved) {
        println!("  Filter: {}", badge.text);
    }
    for card in page.cards() {
        println!("  - #{} {}", card.id, card.render_line());
    }
}

fn run_show(remote: &Remote, id: EntityId, json_output: bool) {
    let client = remote.client();
    let (project, members, issues) = remote.call(async {
        let project = client.project(id).await?;
        let members = client.project_members(id).await?;
        let issues = client.project_issues(id).await?;
        Ok::<_, ApiError>((project, members, issues))
    });

    if json_output {
        print_json(&json!({
            "action": "project.show",
            "project": project,
            "members": members,
            "issues": issues
        }));
        return;
    }

    println!("#{} {}", project.id, project.name);
    println!("  Status: {}", project.status);
    println!("  Creator: {}", project.creator.full_name());
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description: {description}");
    }
    println!("  Members: {}", members.len());
    for member in &members {
        println!("  - {}", member_card(member).render_line());
    }
    println!("  Issues: {}", issues.len());
    for issue in &issues {
        println!("  - #{} {}", issue.id, issue_card(issue).render_line());
    }
}

fn run_edit(
    remote: &Remote,
    id: EntityId,
    name: Option<String>,
    description: Option<String>,
    json_output: bool,
) {
    if name.is_none() && description.is_none() {
        exit_with("nothing to edit (pass --name and/or --description)");
    }
    let client = remote.client();
    let mut project = remote.call(client.project(id));
    let sink = Arc::new(StderrSink);
    let mut outcomes = serde_json::Map::new();

    if let Some(name) = name {
        let mut edit = InlineEdit::new(Some(project.name.as_str()), sink.clone())
            .with_validator(|value| {
                value
                    .is_empty()
                    .then(|| "Project name must not be empty".to_string())
            });
        edit.start_editing();
        edit.set_draft(name);
        let commit_key = edit.commit_key();
        let outcome = remote
            .runtime()
            .block_on(edit.press(commit_key, |value| async move {
                let update = ProjectUpdate {
                    name: Some(value),
                    ..ProjectUpdate::default()
                };
                client.update_project(id, &update).await.map(|p| p.name)
            }))
            .unwrap_or_else(|_| std::process::exit(1));
        if matches!(outcome, SaveOutcome::Invalid(_)) {
            std::process::exit(1);
        }
        project.name = edit.source().to_string();
        outcomes.insert("name".to_string(), json!(outcome.as_str()));
    }

    if let Some(description) = description {
        let mut edit = InlineEdit::new(project.description.as_deref(), sink).multi_line();
        edit.start_editing();
        edit.set_draft(description);
        let commit_key = edit.commit_key();
        let outcome = remote
            .runtime()
            .block_on(edit.press(commit_key, |value| async move {
                let update = ProjectUpdate {
                    description: Some(value),
                    ..ProjectUpdate::default()
                };
                client
                    .update_project(id, &update)
                    .await
                    .map(|p| p.description.unwrap_or_default())
            }))
            .unwrap_or_else(|_| std::process::exit(1));
        project.description = Some(edit.source().to_string()).filter(|d| !d.is_empty());
        outcomes.insert("description".to_string(), json!(outcome.as_str()));
    }

    if json_output {
        print_json(&json!({
            "action": "project.edit",
            "outcomes": outcomes,
            "project": project
        }));
    } else {
        for (field, outcome) in &outcomes {
            println!("  {field}: {}", outcome.as_str().unwrap_or("unknown"));
        }
        println!("#{} {} [{}]", project.id, project.name, project.status);
    }
}

fn run_member(remote: &Remote, command: MemberCommands) {
    match command {
        MemberCommands::List {
            project,
            role,
            json,
        } => {
            let members = remote.call(remote.client().project_members(project));
            let mut filters = ActiveFilters::new();
            set_many(&mut filters, "role", enum_labels_or_exit(&role, UserRole::as_str));
            let rows = search_and_filter(&members, "", &filters, &user_registry());

            if json {
                print_json(&json!({
                    "action": "project.member.list",
                    "projectId": project,
                    "total": members.len(),
                    "count": rows.len(),
                    "items": rows
                }));
                return;
            }

            let resolved = remote.resolve_options(configs::project_details_members());
            let toolbar = ToolbarState::with_filters(filters);
            println!(
                "sprintdesk project member list\n  Project: {project}\n  Count: {} of {}",
                rows.len(),
                members.len()
            );
            for badge in toolbar.badges(&resolved) {
                println!("  Filter: {}", badge.text);
            }
            for member in &rows {
                println!("  - {}", member_card(member).render_line());
            }
        }

        MemberCommands::Add { project, user } => {
            let user_id = remote.user_id_or_exit(&user, &mut None);
            remote.call(remote.client().add_project_member(project, user_id));
            println!("Added user {user_id} to project {project}");
        }

        MemberCommands::Remove { project, user } => {
            let user_id = remote.user_id_or_exit(&user, &mut None);
            remote.call(remote.client().remove_project_member(project, user_id));
            println!("Removed user {user_id} from project {project}");
        }
    }
}

fn emit_project(action: &str, project: &Project, json_output: bool) {
    if json_output {
        print_json(&json!({
            "action": action,
            "project": project
        }));
    } else {
        println!("#{} {} [{}]", project.id, project.name, project.status);
    }
}
