use crate::cli::LabelCommands;
use crate::support::{Remote, exit_with, print_json};
use serde_json::json;
use sprintdesk_model::{LabelCreate, LabelUpdate};

pub fn run(command: LabelCommands, config: Option<&str>) {
    let remote = Remote::connect_or_exit(config);
    let client = remote.client();
    match command {
        LabelCommands::List { issue, json } => {
            let labels = match issue {
                Some(issue_id) => remote.call(client.issue_labels(issue_id)),
                None => remote.call(client.labels()),
            };
            if json {
                print_json(&json!({
                    "action": "label.list",
                    "issueId": issue,
                    "count": labels.len(),
                    "items": labels
                }));
            } else {
                println!("sprintdesk label list\n  Count: {}", labels.len());
                for label in &labels {
                    let state = if label.is_active { "" } else { " (inactive)" };
                    println!("  - #{} {}{state}", label.id, label.name);
                }
            }
        }

        LabelCommands::Create { name, json } => {
            if name.trim().is_empty() {
                exit_with("label name must not be empty");
            }
            let label = remote.call(client.create_label(&LabelCreate::new(name.trim())));
            if json {
                print_json(&json!({
                    "action": "label.create",
                    "label": label
                }));
            } else {
                println!("Created label #{} {}", label.id, label.name);
            }
        }

        LabelCommands::Rename { id, name } => {
            let update = LabelUpdate {
                name: Some(name.trim().to_string()),
                ..LabelUpdate::default()
            };
            let label = remote.call(client.update_label(id, &update));
            println!("Renamed label #{} to {}", label.id, label.name);
        }

        LabelCommands::Delete { id } => {
            remote.call(client.delete_label(id));
            println!("Deleted label {id}");
        }

        LabelCommands::Add { issue, label } => {
            let label_id = remote.label_id_or_exit(&label);
            remote.call(client.add_issue_label(issue, label_id));
            println!("Labelled issue {issue} with {label_id}");
        }

        LabelCommands::Remove { issue, label } => {
            let label_id = remote.label_id_or_exit(&label);
            remote.call(client.remove_issue_label(issue, label_id));
            println!("Removed label {label_id} from issue {issue}");
        }
    }
}
