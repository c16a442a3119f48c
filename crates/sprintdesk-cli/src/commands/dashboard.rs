use crate::support::{Remote, print_json};
use serde_json::json;
use sprintdesk_query::{ChartDatum, dashboard};
use sprintdesk_transport::ApiError;

pub fn run(json_output: bool, config: Option<&str>) {
    let remote = Remote::connect_or_exit(config);
    let client = remote.client();
    let (issues, projects, users) = remote.call(async {
        let issues = client.issues().await?;
        let projects = client.projects().await?;
        let users = client.users().await?;
        Ok::<_, ApiError>((issues, projects, users))
    });

    let team = dashboard::team_members(&projects);
    let charts = [
        ("Issues by status", dashboard::issue_status_chart(&issues)),
        ("Issues by priority", dashboard::issue_priority_chart(&issues)),
        ("Projects by status", dashboard::project_status_chart(&projects)),
        ("Users by role", dashboard::user_role_chart(&users)),
        (
            "Open issues by project",
            dashboard::issues_by_project_chart(&issues, &projects),
        ),
        ("Team workload", dashboard::team_workload_chart(&issues, &team)),
    ];
    let active_issues = dashboard::active_issues(&issues).count();
    let active_projects = dashboard::active_projects(&projects).count();

    if json_output {
        let items = charts
            .iter()
            .map(|(title, data)| json!({ "title": title, "data": data }))
            .collect::<Vec<_>>();
        print_json(&json!({
            "action": "dashboard",
            "activeIssues": active_issues,
            "activeProjects": active_projects,
            "users": users.len(),
            "charts": items
        }));
        return;
    }

    println!("sprintdesk dashboard");
    println!("  Active issues: {active_issues}");
    println!("  Active projects: {active_projects}");
    println!("  Users: {}", users.len());
    for (title, data) in &charts {
        print_chart(title, data);
    }
}

fn print_chart(title: &str, data: &[ChartDatum]) {
    println!("\n{title}");
    if data.is_empty() {
        println!("  (no data)");
        return;
    }
    let width = data.iter().map(|d| d.name.chars().count()).max().unwrap_or(0);
    for datum in data {
        println!(
            "  {:<width$}  {:>3} {}",
            datum.name,
            datum.value,
            "#".repeat(datum.value.min(40))
        );
    }
}
