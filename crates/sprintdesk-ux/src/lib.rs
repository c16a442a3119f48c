//! UX composition layer.
//!
//! This crate owns the interaction shape of SprintDesk views: the inline edit
//! controller, the fetch adapter behind every data-backed view, toolbar state,
//! and the list-card projection. Data comes from `sprintdesk-transport`;
//! filtering and search come from `sprintdesk-query`.

pub mod edit;
pub mod fetch;
pub mod list_card;
pub mod sink;
pub mod toolbar;

pub use edit::{
    EditError, EditIntent, EditKey, EditPhase, FieldKind, InlineEdit, SaveOutcome, SaveStep,
};
pub use fetch::{CancellationToken, FetchAdapter, FetchState, FetchTicket};
pub use list_card::{Badge, BadgeTone, ListCard};
pub use sink::{CollectingSink, ErrorSink, NullSink, UserFacing};
pub use toolbar::{FilterBadge, ToolbarState};

use sprintdesk_model::{Issue, ListItem, Project, User};
use sprintdesk_query::{
    PredicateRegistry, Searchable, issue_registry, project_registry, user_registry,
};
use sprintdesk_transport::ApiClient;

/// A list view: fetched rows, toolbar state, and the registry that filters them.
#[derive(Debug)]
pub struct ListPage<T> {
    pub fetch: FetchAdapter<Vec<T>>,
    pub toolbar: ToolbarState,
    registry: PredicateRegistry<T>,
}

impl<T> ListPage<T>
where
    T: Searchable + Clone + Send + std::fmt::Debug + 'static,
    ListItem: From<T>,
{
    pub fn new(fetch: FetchAdapter<Vec<T>>, registry: PredicateRegistry<T>) -> Self {
        Self {
            fetch,
            toolbar: ToolbarState::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &PredicateRegistry<T> {
        &self.registry
    }

    /// Every fetched row, unfiltered.
    pub fn rows(&self) -> Vec<T> {
        self.fetch.data().unwrap_or_default()
    }

    /// Rows after search and filters.
    pub fn visible(&self) -> Vec<T> {
        self.toolbar.visible(&self.rows(), &self.registry)
    }

    pub fn cards(&self) -> Vec<ListCard> {
        self.visible()
            .into_iter()
            .map(|row| ListCard::from(&ListItem::from(row)))
            .collect()
    }
}

pub fn issues_page(client: ApiClient, token: CancellationToken) -> ListPage<Issue> {
    let fetch = FetchAdapter::new(
        move || {
            let client = client.clone();
            async move { client.issues().await }
        },
        token,
    );
    ListPage::new(fetch, issue_registry())
}

pub fn projects_page(client: ApiClient, token: CancellationToken) -> ListPage<Project> {
    let fetch = FetchAdapter::new(
        move || {
            let client = client.clone();
            async move { client.projects().await }
        },
        token,
    );
    ListPage::new(fetch, project_registry())
}

pub fn users_page(client: ApiClient, token: CancellationToken) -> ListPage<User> {
    let fetch = FetchAdapter::new(
        move || {
            let client = client.clone();
            async move { client.users().await }
        },
        token,
    );
    ListPage::new(fetch, user_registry())
}
