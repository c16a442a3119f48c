use crate::commands::user::emit_user;
use crate::support::{Remote, config_or_exit, exit_with, password_or_exit, print_json};
use serde_json::json;
use sprintdesk_model::UserRegistration;
use sprintdesk_transport::{FileTokenStore, TokenStore};

pub fn run_login(username: String, password: Option<String>, json_output: bool, config: Option<&str>) {
    let password = password_or_exit(password);
    let remote = Remote::connect_or_exit(config);
    let token = remote.call(remote.client().login(&username, &password));
    tracing::info!(%username, "logged in");

    if json_output {
        print_json(&json!({
            "action": "login",
            "username": username,
            "tokenType": token.token_type,
            "expiresIn": token.expires_in
        }));
    } else {
        println!("Logged in as {username}");
    }
}

/// Drops the stored token. Works offline.
pub fn run_logout(config: Option<&str>) {
    let loaded = config_or_exit(config);
    let store = FileTokenStore::new(&loaded.config.token_path);
    store.remove().unwrap_or_else(|e| exit_with(e));
    println!("Logged out");
}

pub fn run_whoami(json_output: bool, config: Option<&str>) {
    let remote = Remote::connect_or_exit(config);
    if !remote.client().session().is_authenticated() {
        exit_with("not logged in (run `sprintdesk login <username>`)");
    }
    let user = remote.call(remote.client().current_user());
    emit_user("whoami", &user, json_output);
}

pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub title: Option<String>,
    pub password: Option<String>,
    pub json: bool,
}

pub fn run_register(args: RegisterArgs, config: Option<&str>) {
    let registration = UserRegistration {
        username: args.username,
        password: password_or_exit(args.password),
        firstname: args.firstname,
        lastname: args.lastname,
        email: args.email,
        title: args.title.filter(|t| !t.trim().is_empty()),
        role: None,
    };
    let remote = Remote::connect_or_exit(config);
    let user = remote.call(remote.client().register(&registration));
    emit_user("register", &user, args.json);
}
