//! Typed REST client over every endpoint the SprintDesk client consumes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sprintdesk_model::{
    Comment, CommentCreate, CommentUpdate, EntityId, Issue, IssueCreate, IssueUpdate, Label,
    LabelCreate, LabelUpdate, LoginRequest, Project, ProjectCreate, ProjectUpdate, TokenResponse,
    User, UserRegistration, UserUpdate,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ApiError, detail_message, error_body, is_expired_token};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, Method, truncate_for_log};
use crate::session::Session;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Session,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ApiClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── Core request path ──

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            path: path.to_string(),
            bearer: self.session.get(),
            body,
        };
        debug!(%method, path, authenticated = request.bearer.is_some(), "api request");

        let response = self.transport.send(request).await.map_err(|err| {
            warn!(%method, path, error = %err, "api request failed before a response");
            ApiError::Network(err.0)
        })?;
        debug!(%method, path, status = response.status, "api response");

        if response.is_success() {
            return Ok(response);
        }

        let body = error_body(&response);
        if is_expired_token(response.status, &body) {
            warn!(path, "bearer token rejected; clearing session");
            if let Err(err) = self.session.clear() {
                warn!(error = %err, "failed to remove persisted token");
            }
            return Err(ApiError::SessionExpired);
        }

        let message = detail_message(&body);
        debug!(
            status = response.status,
            body = %truncate_for_log(&response.body),
            "api error response"
        );
        Err(ApiError::Status {
            status: response.status,
            message,
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, body).await?;
        let payload = if response.status == 204 || response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(payload).map_err(|err| {
            warn!(path, error = %err, "undecodable response body");
            ApiError::Decode(err.to_string())
        })
    }

    /// For endpoints whose success body carries nothing the caller needs.
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        self.send(method, path, body).await.map(|_| ())
    }

    // ── Auth ──

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token: TokenResponse = self
            .request(Method::Post, "/auth/login", Some(encode(&payload)?))
            .await?;
        self.session.set(token.access_token.clone())?;
        Ok(token)
    }

    pub async fn register(&self, registration: &UserRegistration) -> Result<User, ApiError> {
        self.request(Method::Post, "/auth/register", Some(encode(registration)?))
            .await
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.session.clear()?;
        Ok(())
    }

    // ── Users ──

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request(Method::Get, "/users/me", None).await
    }

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.request(Method::Get, "/users/", None).await
    }

    pub async fn active_users(&self) -> Result<Vec<User>, ApiError> {
        self.request(Method::Get, "/users/active", None).await
    }

    pub async fn user(&self, id: EntityId) -> Result<User, ApiError> {
        self.request(Method::Get, &format!("/users/{id}"), None).await
    }

    pub async fn create_user(&self, registration: &UserRegistration) -> Result<User, ApiError> {
        self.request(Method::Post, "/users/", Some(encode(registration)?))
            .await
    }

    pub async fn update_user(&self, id: EntityId, update: &UserUpdate) -> Result<User, ApiError> {
        self.request(Method::Patch, &format!("/users/{id}"), Some(encode(update)?))
            .await
    }

    pub async fn delete_user(&self, id: EntityId) -> Result<(), ApiError> {
        self.request_empty(Method::Delete, &format!("/users/{id}"), None)
            .await
    }

    pub async fn activate_user(&self, id: EntityId) -> Result<User, ApiError> {
        self.request(Method::Patch, &format!("/users/{id}/activate"), None)
            .await
    }

    pub async fn deactivate_user(&self, id: EntityId) -> Result<User, ApiError> {
        self.request(Method::Patch, &format!("/users/{id}/deactivate"), None)
            .await
    }

    // ── Projects ──

    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.request(Method::Get, "/projects/", None).await
    }

    pub async fn project(&self, id: EntityId) -> Result<Project, ApiError> {
        self.request(Method::Get, &format!("/projects/{id}"), None)
            .await
    }

    pub async fn create_project(&self, project: &ProjectCreate) -> Result<Project, ApiError> {
        self.request(Method::Post, "/projects/", Some(encode(project)?))
            .await
    }

    pub async fn update_project(
        &self,
        id: EntityId,
        update: &ProjectUpdate,
    ) -> Result<Project, ApiError> {
        self.request(Method::Patch, &format!("/projects/{id}"), Some(encode(update)?))
            .await
    }

    pub async fn delete_project(&self, id: EntityId) -> Result<(), ApiError> {
        self.request_empty(Method::Delete, &format!("/projects/{id}"), None)
            .await
    }

    pub async fn project_members(&self, id: EntityId) -> Result<Vec<User>, ApiError> {
        self.request(Method::Get, &format!("/projects/{id}/members"), None)
            .await
    }

    pub async fn add_project_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<(), ApiError> {
        self.request_empty(
            Method::Post,
            &format!("/projects/{project_id}/members/{user_id}"),
            None,
        )
        .await
    }

    pub async fn remove_project_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<(), ApiError> {
        self.request_empty(
            Method::Delete,
            &format!("/projects/{project_id}/members/{user_id}"),
            None,
        )
        .await
    }

    // ── Issues ──

    pub async fn issues(&self) -> Result<Vec<Issue>, ApiError> {
        self.request(Method::Get, "/issues/", None).await
    }

    pub async fn issue(&self, id: EntityId) -> Result<Issue, ApiError> {
        self.request(Method::Get, &format!("/issues/{id}"), None).await
    }

    pub async fn project_issues(&self, project_id: EntityId) -> Result<Vec<Issue>, ApiError> {
        self.request(Method::Get, &format!("/issues/project/{project_id}"), None)
            .await
    }

    pub async fn assigned_issues(&self, user_id: EntityId) -> Result<Vec<Issue>, ApiError> {
        self.request(Method::Get, &format!("/issues/assignee/{user_id}"), None)
            .await
    }

    pub async fn create_issue(&self, issue: &IssueCreate) -> Result<Issue, ApiError> {
        self.request(Method::Post, "/issues/", Some(encode(issue)?))
            .await
    }

    pub async fn update_issue(&self, id: EntityId, update: &IssueUpdate) -> Result<Issue, ApiError> {
        self.request(Method::Patch, &format!("/issues/{id}"), Some(encode(update)?))
            .await
    }

    pub async fn close_issue(&self, id: EntityId) -> Result<Issue, ApiError> {
        self.request(Method::Patch, &format!("/issues/{id}/close"), None)
            .await
    }

    pub async fn reopen_issue(&self, id: EntityId) -> Result<Issue, ApiError> {
        self.request(Method::Patch, &format!("/issues/{id}/reopen"), None)
            .await
    }

    pub async fn delete_issue(&self, id: EntityId) -> Result<(), ApiError> {
        self.request_empty(Method::Delete, &format!("/issues/{id}"), None)
            .await
    }

    // ── Comments ──

    pub async fn issue_comments(&self, issue_id: EntityId) -> Result<Vec<Comment>, ApiError> {
        self.request(Method::Get, &format!("/comments/issue/{issue_id}"), None)
            .await
    }

    pub async fn create_comment(&self, issue_id: EntityId, content: &str) -> Result<Comment, ApiError> {
        let payload = CommentCreate {
            issue_id,
            content: content.to_string(),
        };
        self.request(Method::Post, "/comments/", Some(encode(&payload)?))
            .await
    }

    pub async fn update_comment(&self, id: EntityId, content: &str) -> Result<Comment, ApiError> {
        let payload = CommentUpdate {
            content: content.to_string(),
        };
        self.request(Method::Patch, &format!("/comments/{id}"), Some(encode(&payload)?))
            .await
    }

    pub async fn delete_comment(&self, id: EntityId) -> Result<(), ApiError> {
        self.request_empty(Method::Delete, &format!("/comments/{id}"), None)
            .await
    }

    // ── Labels ──

    pub async fn labels(&self) -> Result<Vec<Label>, ApiError> {
        self.request(Method::Get, "/labels/", None).await
    }

    pub async fn issue_labels(&self, issue_id: EntityId) -> Result<Vec<Label>, ApiError> {
        self.request(Method::Get, &format!("/labels/issue/{issue_id}"), None)
            .await
    }

    pub async fn create_label(&self, label: &LabelCreate) -> Result<Label, ApiError> {
        self.request(Method::Post, "/labels/", Some(encode(label)?))
            .await
    }

    pub async fn update_label(&self, id: EntityId, update: &LabelUpdate) -> Result<Label, ApiError> {
        self.request(Method::Patch, &format!("/labels/{id}"), Some(encode(update)?))
            .await
    }

    pub async fn delete_label(&self, id: EntityId) -> Result<(), ApiError> {
        self.request_empty(Method::Delete, &format!("/labels/{id}"), None)
            .await
    }

    pub async fn add_issue_label(
        &self,
        issue_id: EntityId,
        label_id: EntityId,
    ) -> Result<(), ApiError> {
        self.request_empty(
            Method::Post,
            &format!("/issues/{issue_id}/labels/{label_id}"),
            None,
        )
        .await
    }

    pub async fn remove_issue_label(
        &self,
        issue_id: EntityId,
        label_id: EntityId,
    ) -> Result<(), ApiError> {
        self.request_empty(
            Method::Delete,
            &format!("/issues/{issue_id}/labels/{label_id}"),
            None,
        )
        .await
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|err| ApiError::Encode(err.to_string()))
}
