use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "sprintdesk-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Config pointing at a closed local port and a token file inside the temp dir.
    fn write_config(&self) -> PathBuf {
        let config = self.path.join("sprintdesk.toml");
        let token = self.path.join("token.json");
        fs::write(
            &config,
            format!(
                "base_url = \"http://127.0.0.1:9/api/v1\"\ntoken_path = {:?}\ntimeout_secs = 2\n",
                token.display().to_string()
            ),
        )
        .expect("config should be written");
        config
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_sprintdesk<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_sprintdesk");
    Command::new(bin)
        .args(args)
        .env_remove("SPRINTDESK_CONFIG")
        .env_remove("SPRINTDESK_BASE_URL")
        .env_remove("SPRINTDESK_TOKEN_PATH")
        .env_remove("SPRINTDESK_PASSWORD")
        .env_remove("SPRINTDESK_LOG")
        .output()
        .expect("sprintdesk command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be valid json: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn help_lists_top_level_commands() {
    let output = run_sprintdesk(["--help"]);
    assert_success(&output);
    let text = stdout_text(&output);
    for command in [
        "login",
        "logout",
        "whoami",
        "issue",
        "project",
        "user",
        "label",
        "dashboard",
        "config",
    ] {
        assert!(text.contains(command), "help should mention {command}:\n{text}");
    }
}

#[test]
fn issue_help_lists_filter_flags() {
    let output = run_sprintdesk(["issue", "list", "--help"]);
    assert_success(&output);
    let text = stdout_text(&output);
    for flag in ["--status", "--priority", "--assignee", "--project", "--search", "--json"] {
        assert!(text.contains(flag), "issue list help should mention {flag}");
    }
}

#[test]
fn config_json_reports_file_values() {
    let tmp = TempDirGuard::new("config-json");
    let config = tmp.write_config();

    let output = run_sprintdesk([
        OsStr::new("config"),
        OsStr::new("--json"),
        OsStr::new("--config"),
        config.as_os_str(),
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["action"], "config");
    assert_eq!(payload["baseUrl"], "http://127.0.0.1:9/api/v1");
    assert_eq!(payload["timeoutSecs"], 2);
    assert_eq!(payload["tokenPresent"], false);
    assert_eq!(
        payload["tokenPath"],
        tmp.path().join("token.json").display().to_string()
    );
}

#[test]
fn base_url_env_overrides_the_file() {
    let tmp = TempDirGuard::new("config-env");
    let config = tmp.write_config();

    let output = Command::new(env!("CARGO_BIN_EXE_sprintdesk"))
        .args(["config", "--json"])
        .env("SPRINTDESK_CONFIG", &config)
        .env("SPRINTDESK_BASE_URL", "https://desk.example.com/api/v1")
        .env_remove("SPRINTDESK_TOKEN_PATH")
        .output()
        .expect("sprintdesk command should execute");
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["baseUrl"], "https://desk.example.com/api/v1");
    assert_eq!(payload["source"], config.display().to_string());
}

#[test]
fn missing_config_file_fails() {
    let tmp = TempDirGuard::new("config-missing");
    let missing = tmp.path().join("nope.toml");

    let output = run_sprintdesk([
        OsStr::new("config"),
        OsStr::new("--config"),
        missing.as_os_str(),
    ]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: failed to read config"));
}

#[test]
fn logout_removes_the_stored_token_offline() {
    let tmp = TempDirGuard::new("logout");
    let config = tmp.write_config();
    let token = tmp.path().join("token.json");
    fs::write(&token, r#"{"token":"abc"}"#).expect("token should be written");

    let output = run_sprintdesk([
        OsStr::new("logout"),
        OsStr::new("--config"),
        config.as_os_str(),
    ]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("Logged out"));
    assert!(!token.exists());
}

#[test]
fn whoami_without_token_fails_before_any_request() {
    let tmp = TempDirGuard::new("whoami");
    let config = tmp.write_config();

    let output = run_sprintdesk([
        OsStr::new("whoami"),
        OsStr::new("--config"),
        config.as_os_str(),
    ]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: not logged in"));
}

#[test]
fn login_requires_a_password() {
    let tmp = TempDirGuard::new("login");
    let config = tmp.write_config();

    let output = run_sprintdesk([
        OsStr::new("login"),
        OsStr::new("ada"),
        OsStr::new("--config"),
        config.as_os_str(),
    ]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: password required"));
}

#[test]
fn unreachable_server_reports_network_error() {
    let tmp = TempDirGuard::new("network");
    let config = tmp.write_config();

    let output = run_sprintdesk([
        OsStr::new("issue"),
        OsStr::new("list"),
        OsStr::new("--json"),
        OsStr::new("--config"),
        config.as_os_str(),
    ]);
    assert_failure(&output);
    assert!(stdout_text(&output).is_empty());
    assert!(stderr_text(&output).contains("error: Network error occurred"));
}

#[test]
fn unknown_status_is_rejected() {
    let tmp = TempDirGuard::new("bad-status");
    let config = tmp.write_config();

    let output = run_sprintdesk([
        OsStr::new("issue"),
        OsStr::new("list"),
        OsStr::new("--status"),
        OsStr::new("done"),
        OsStr::new("--config"),
        config.as_os_str(),
    ]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: unknown"));
}
