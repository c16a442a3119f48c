use crate::cli::IssueCommands;
use crate::support::{
    Remote, StderrSink, assignee_value, enum_labels_or_exit, exit_with, parse_or_exit, print_json,
    set_many,
};
use serde_json::{Value, json};
use sprintdesk_model::{
    Comment, EntityId, Issue, IssueCreate, IssuePriority, IssueStatus, IssueUpdate, Label,
    Project, User,
};
use sprintdesk_query::{ActiveFilters, FilterSelection, FilterValue, configs};
use sprintdesk_transport::ApiError;
use sprintdesk_ux::{CancellationToken, InlineEdit, SaveOutcome, issues_page};
use std::sync::Arc;

pub fn run(command: IssueCommands, config: Option<&str>) {
    let remote = Remote::connect_or_exit(config);
    match command {
        IssueCommands::List {
            status,
            priority,
            assignee,
            author,
            project,
            open,
            search,
            json,
        } => run_list(
            &remote,
            ListArgs {
                status,
                priority,
                assignee,
                author,
                project,
                open,
                search,
            },
            json,
        ),

        IssueCommands::Show { id, json } => run_show(&remote, id, json),

        IssueCommands::Create {
            title,
            project,
            description,
            status,
            priority,
            assignee,
            estimate,
            json,
        } => {
            let mut users = None;
            let mut projects = None;
            let create = IssueCreate {
                project_id: remote.project_id_or_exit(&project, &mut projects),
                title,
                description: description.filter(|d| !d.trim().is_empty()),
                status: parse_or_exit(&status),
                priority: parse_or_exit(&priority),
                assignee_id: assignee.map(|a| remote.user_id_or_exit(&a, &mut users)),
                time_estimate: estimate,
            };
            let issue = remote.call(remote.client().create_issue(&create));
            emit_issue("issue.create", &issue, json);
        }

        IssueCommands::Edit {
            id,
            title,
            description,
            json,
        } => run_edit(&remote, id, title, description, json),

        IssueCommands::Status { id, status, json } => {
            let status: IssueStatus = parse_or_exit(&status);
            let issue = remote.call(remote.client().update_issue(id, &IssueUpdate::status(status)));
            emit_issue("issue.status", &issue, json);
        }

        IssueCommands::Priority { id, priority, json } => {
            let priority: IssuePriority = parse_or_exit(&priority);
            let update = IssueUpdate::priority(priority);
            let issue = remote.call(remote.client().update_issue(id, &update));
            emit_issue("issue.priority", &issue, json);
        }

        IssueCommands::Assign { id, assignee, json } => {
            let assignee_id = if assignee.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(remote.user_id_or_exit(&assignee, &mut None))
            };
            let update = IssueUpdate::assignee(assignee_id);
            let issue = remote.call(remote.client().update_issue(id, &update));
            emit_issue("issue.assign", &issue, json);
        }

        IssueCommands::Close { id, json } => {
            let issue = remote.call(remote.client().close_issue(id));
            emit_issue("issue.close", &issue, json);
        }

        IssueCommands::Reopen { id, json } => {
            let issue = remote.call(remote.client().reopen_issue(id));
            emit_issue("issue.reopen", &issue, json);
        }

        IssueCommands::Delete { id } => {
            remote.call(remote.client().delete_issue(id));
            println!("Deleted issue {id}");
        }

        IssueCommands::Comment { id, content, json } => {
            if content.trim().is_empty() {
                exit_with("comment must not be empty");
            }
            let comment = remote.call(remote.client().create_comment(id, content.trim()));
            if json {
                print_json(&json!({
                    "action": "issue.comment",
                    "comment": comment
                }));
            } else {
                println!("Added comment {} to issue {id}", comment.id);
            }
        }

        IssueCommands::Comments { id, json } => {
            let comments = remote.call(remote.client().issue_comments(id));
            if json {
                print_json(&json!({
                    "action": "issue.comments",
                    "issueId": id,
                    "count": comments.len(),
                    "items": comments
                }));
            } else {
                println!("sprintdesk issue comments\n  Issue: {id}\n  Count: {}", comments.len());
                print_comments(&comments);
            }
        }
    }
}

struct ListArgs {
    status: Vec<String>,
    priority: Vec<String>,
    assignee: Vec<String>,
    author: Vec<String>,
    project: Vec<String>,
    open: bool,
    search: Option<String>,
}

fn run_list(remote: &Remote, args: ListArgs, json_output: bool) {
    let mut users: Option<Vec<User>> = None;
    let mut projects: Option<Vec<Project>> = None;

    let mut filters = ActiveFilters::new();
    set_many(
        &mut filters,
        "status",
        enum_labels_or_exit(&args.status, IssueStatus::as_str),
    );
    if args.open && args.status.is_empty() {
        filters.set(
            "status",
            FilterSelection::many(IssueStatus::NOT_CLOSED.iter().map(|s| s.as_str())),
        );
    }
    set_many(
        &mut filters,
        "priority",
        enum_labels_or_exit(&args.priority, IssuePriority::as_str),
    );
    let assignees = args
        .assignee
        .iter()
        .map(|a| assignee_value(remote, a, &mut users))
        .collect();
    set_many(&mut filters, "assignee", assignees);
    let authors = args
        .author
        .iter()
        .map(|a| FilterValue::Number(remote.user_id_or_exit(a, &mut users)))
        .collect();
    set_many(&mut filters, "author", authors);
    let project_ids = args
        .project
        .iter()
        .map(|p| FilterValue::Number(remote.project_id_or_exit(p, &mut projects)))
        .collect();
    set_many(&mut filters, "project", project_ids);

    let mut page = issues_page(remote.client().clone(), CancellationToken::new());
    remote.runtime().block_on(page.fetch.refetch());
    if let Some(message) = page.fetch.error() {
        exit_with(message);
    }
    page.toolbar.set_filters(filters);
    if let Some(search) = &args.search {
        page.toolbar.set_search(search.as_str());
    }

    let rows = page.visible();
    if json_output {
        let items = rows.iter().map(issue_row).collect::<Vec<_>>();
        print_json(&json!({
            "action": "issue.list",
            "total": page.rows().len(),
            "count": items.len(),
            "filters": page.toolbar.filters(),
            "search": page.toolbar.search(),
            "items": items
        }));
        return;
    }

    let resolved = remote.resolve_options(configs::issues_page(
        projects.as_deref(),
        users.as_deref(),
    ));
    println!(
        "sprintdesk issue list\n  Count: {} of {}",
        rows.len(),
        page.rows().len()
    );
    if !page.toolbar.search().is_empty() {
        println!("  Search: {}", page.toolbar.search());
    }
    for badge in page.toolbar.badges(&resolved) {
        println!("  Filter: {}", badge.text);
    }
    for card in page.cards() {
        println!("  - #{} {}", card.id, card.render_line());
    }
}

fn run_show(remote: &Remote, id: EntityId, json_output: bool) {
    let client = remote.client();
    let (issue, comments, labels) = remote.call(async {
        let issue = client.issue(id).await?;
        let comments = client.issue_comments(id).await?;
        let labels = client.issue_labels(id).await?;
        Ok::<_, ApiError>((issue, comments, labels))
    });

    if json_output {
        print_json(&json!({
            "action": "issue.show",
            "issue": issue,
            "comments": comments,
            "labels": labels
        }));
        return;
    }

    print_issue(&issue, &labels);
    println!("  Comments: {}", comments.len());
    print_comments(&comments);
}

fn run_edit(
    remote: &Remote,
    id: EntityId,
    title: Option<String>,
    description: Option<String>,
    json_output: bool,
) {
    if title.is_none() && description.is_none() {
        exit_with("nothing to edit (pass --title and/or --description)");
    }
    let client = remote.client();
    let mut issue = remote.call(client.issue(id));
    let sink = Arc::new(StderrSink);
    let mut outcomes = serde_json::Map::new();

    if let Some(title) = title {
        let mut edit = InlineEdit::new(Some(issue.title.as_str()), sink.clone()).with_validator(|value| {
            value
                .is_empty()
                .then(|| "Title must not be empty".to_string())
        });
        edit.start_editing();
        edit.set_draft(title);
        let commit_key = edit.commit_key();
        let outcome = remote
            .runtime()
            .block_on(edit.press(commit_key, |value| async move {
                client
                    .update_issue(id, &IssueUpdate::title(value))
                    .await
                    .map(|updated| updated.title)
            }))
            .unwrap_or_else(|_| std::process::exit(1));
        exit_if_invalid(&outcome);
        issue.title = edit.source().to_string();
        outcomes.insert("title".to_string(), json!(outcome.as_str()));
    }

    if let Some(description) = description {
        let mut edit = InlineEdit::new(issue.description.as_deref(), sink).multi_line();
        edit.start_editing();
        edit.set_draft(description);
        let commit_key = edit.commit_key();
        let outcome = remote
            .runtime()
            .block_on(edit.press(commit_key, |value| async move {
                client
                    .update_issue(id, &IssueUpdate::description(&value))
                    .await
                    .map(|updated| updated.description.unwrap_or_default())
            }))
            .unwrap_or_else(|_| std::process::exit(1));
        issue.description = Some(edit.source().to_string()).filter(|d| !d.is_empty());
        outcomes.insert("description".to_string(), json!(outcome.as_str()));
    }

    if json_output {
        print_json(&json!({
            "action": "issue.edit",
            "outcomes": outcomes,
            "issue": issue
        }));
    } else {
        for (field, outcome) in &outcomes {
            println!("  {field}: {}", outcome.as_str().unwrap_or("unknown"));
        }
        print_issue(&issue, &[]);
    }
}

fn exit_if_invalid(outcome: &SaveOutcome) {
    if matches!(outcome, SaveOutcome::Invalid(_)) {
        std::process::exit(1);
    }
}

fn issue_row(issue: &Issue) -> Value {
    json!({
        "id": issue.id,
        "title": issue.title,
        "status": issue.status,
        "priority": issue.priority,
        "projectId": issue.project_id,
        "project": issue.project.name,
        "assigneeId": issue.assignee_id,
        "assignee": issue.assignee.as_ref().map(|a| a.username.clone()),
        "authorId": issue.author_id,
        "createdAt": issue.created_at
    })
}

fn emit_issue(action: &str, issue: &Issue, json_output: bool) {
    if json_output {
        print_json(&json!({
            "action": action,
            "issue": issue
        }));
    } else {
        print_issue(issue, &[]);
    }
}

fn print_issue(issue: &Issue, labels: &[Label]) {
    println!("#{} {}", issue.id, issue.title);
    println!("  Project: {}", issue.project.name);
    println!("  Status: {}", issue.status);
    println!("  Priority: {}", issue.priority);
    println!(
        "  Assignee: {}",
        issue
            .assignee
            .as_ref()
            .map(|a| a.full_name())
            .unwrap_or_else(|| "Unassigned".to_string())
    );
    if let Some(author) = &issue.author {
        println!("  Author: {}", author.full_name());
    }
    if let Some(hours) = issue.time_estimate {
        println!("  Estimate: {hours}h");
    }
    if !labels.is_empty() {
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        println!("  Labels: {}", names.join(", "));
    }
    if let Some(description) = issue.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description:");
        for line in description.lines() {
            println!("    {line}");
        }
    }
}

fn print_comments(comments: &[Comment]) {
    for comment in comments {
        println!(
            "  - {} ({}): {}",
            comment.author.full_name(),
            comment.created_at.format("%Y-%m-%d %H:%M"),
            comment.content
        );
    }
}
