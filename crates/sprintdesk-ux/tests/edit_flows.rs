//! Integration tests: inline edits and list fetches wired to the REST client.

use async_trait::async_trait;
use serde_json::json;
use sprintdesk_model::IssueUpdate;
use sprintdesk_transport::{
    ApiClient, ApiError, HttpRequest, HttpResponse, HttpTransport, MemoryTokenStore, Session,
    TransportFailure,
};
use sprintdesk_ux::{
    CancellationToken, CollectingSink, EditError, EditIntent, EditKey, EditPhase, InlineEdit,
    SaveOutcome, issues_page,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().expect("requests lock").push(request);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .ok_or_else(|| TransportFailure("script exhausted".to_string()))
    }
}

fn client(transport: Arc<ScriptedTransport>) -> ApiClient {
    let session = Session::restore(Arc::new(MemoryTokenStore::with_token("tok")))
        .expect("memory store never fails");
    ApiClient::new(transport, session)
}

fn issue_body(id: i64, title: &str) -> String {
    json!({
        "id": id,
        "project_id": 1,
        "title": title,
        "status": "Open",
        "priority": "High",
        "assignee_id": null,
        "created_at": "2025-03-01T09:30:00",
        "project": {"id": 1, "name": "Apollo", "status": "Active"}
    })
    .to_string()
}

async fn save_title(
    edit: &mut InlineEdit,
    client: &ApiClient,
    id: i64,
) -> Result<SaveOutcome, EditError<ApiError>> {
    edit.save(|title| async move {
        client
            .update_issue(id, &IssueUpdate::title(title))
            .await
            .map(|issue| issue.title)
    })
    .await
}

#[tokio::test]
async fn padded_identical_title_never_reaches_the_server() {
    let transport = ScriptedTransport::new(Vec::<HttpResponse>::new());
    let client = client(transport.clone());
    let sink = Arc::new(CollectingSink::new());
    let mut edit = InlineEdit::new(Some("Fix bug"), sink.clone());

    edit.start_editing();
    edit.set_draft("  Fix bug  ");
    assert_eq!(edit.key(EditKey::Enter), EditIntent::Save);

    let outcome = save_title(&mut edit, &client, 1).await.expect("no-op");
    assert_eq!(outcome, SaveOutcome::Unchanged);
    assert_eq!(transport.request_count(), 0);
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn server_rejection_reverts_and_reports_the_detail() {
    let transport = ScriptedTransport::new([HttpResponse::json(
        403,
        r#"{"detail":"Not enough permissions"}"#,
    )]);
    let client = client(transport.clone());
    let sink = Arc::new(CollectingSink::new());
    let mut edit = InlineEdit::new(Some("Fix bug"), sink.clone());

    edit.start_editing();
    edit.set_draft("Fix the bug");
    let err = save_title(&mut edit, &client, 1)
        .await
        .expect_err("403 propagates");

    assert_eq!(err.into_inner().status(), Some(403));
    assert_eq!(edit.phase(), EditPhase::Viewing);
    assert_eq!(edit.display_value(), "Fix bug");
    assert_eq!(sink.messages(), vec!["Not enough permissions".to_string()]);
}

#[tokio::test]
async fn accepted_title_becomes_the_new_source() {
    let transport =
        ScriptedTransport::new([HttpResponse::json(200, issue_body(1, "Fix the bug"))]);
    let client = client(transport.clone());
    let sink = Arc::new(CollectingSink::new());
    let mut edit = InlineEdit::new(Some("Fix bug"), sink);

    edit.start_editing();
    edit.set_draft("Fix the bug ");
    let outcome = save_title(&mut edit, &client, 1).await.expect("saved");

    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(edit.source(), "Fix the bug");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn issue_list_keeps_stale_rows_when_refetch_fails() {
    let transport = ScriptedTransport::new([
        HttpResponse::json(200, format!("[{}]", issue_body(1, "Fix bug"))),
        HttpResponse::text(502, "Bad Gateway"),
    ]);
    let page = issues_page(client(transport), CancellationToken::new());

    assert!(page.fetch.refetch().await);
    assert_eq!(page.rows().len(), 1);

    assert!(page.fetch.refetch().await);
    let state = page.fetch.state();
    assert_eq!(state.error.as_deref(), Some("Unknown error"));
    assert_eq!(state.data.map(|rows| rows.len()), Some(1));
    assert!(!state.loading);
}
