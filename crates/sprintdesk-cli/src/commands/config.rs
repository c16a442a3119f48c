use crate::support::{config_or_exit, print_json};
use serde_json::json;

pub fn run(json_output: bool, config: Option<&str>) {
    let loaded = config_or_exit(config);
    let source = loaded
        .source
        .as_ref()
        .map(|p| p.display().to_string());
    let token_present = loaded.config.token_path.exists();

    if json_output {
        print_json(&json!({
            "action": "config",
            "source": source,
            "baseUrl": loaded.config.base_url,
            "tokenPath": loaded.config.token_path.display().to_string(),
            "tokenPresent": token_present,
            "timeoutSecs": loaded.config.timeout_secs
        }));
    } else {
        println!(
            "sprintdesk config\n  Source: {}\n  Base URL: {}\n  Token path: {}\n  Token present: {}\n  Timeout: {}s",
            source.as_deref().unwrap_or("(defaults)"),
            loaded.config.base_url,
            loaded.config.token_path.display(),
            token_present,
            loaded.config.timeout_secs
        );
    }
}
