//! Async data fetch adapter: `{data, loading, error, refetch}` over a producer.
//!
//! Every run takes a ticket with a fresh sequence number. A completion is
//! applied only if its ticket is still the latest one issued and the owning
//! view's [`CancellationToken`] has not fired; anything else is dropped.

use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::sink::UserFacing;

/// Fallback message when a failure carries no text.
pub const GENERIC_FETCH_ERROR: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

/// Tied to a view's lifetime; once cancelled, no completion lands.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Identifies one run of the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;

pub type Producer<T> = Arc<dyn Fn() -> FetchFuture<T> + Send + Sync>;

pub struct FetchAdapter<T> {
    state: Arc<Mutex<FetchState<T>>>,
    issued: Arc<AtomicU64>,
    token: CancellationToken,
    producer: Producer<T>,
}

impl<T> Clone for FetchAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            issued: Arc::clone(&self.issued),
            token: self.token.clone(),
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FetchAdapter<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FetchAdapter")
            .field("state", &self.state)
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .field("cancelled", &self.token.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> FetchAdapter<T> {
    /// Adapter in its initial state (`loading`, no data). Nothing runs until
    /// [`FetchAdapter::refetch`] is called.
    pub fn new<F, Fut, E>(producer: F, token: CancellationToken) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: UserFacing + Send + 'static,
    {
        let producer: Producer<T> = Arc::new(move || {
            let fut = producer();
            Box::pin(async move { fut.await.map_err(|err| extract_message(&err)) })
        });
        Self {
            state: Arc::new(Mutex::new(FetchState::default())),
            issued: Arc::new(AtomicU64::new(0)),
            token,
            producer,
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Start a run: loading on, error cleared, data kept.
    pub fn begin(&self) -> FetchTicket {
        let ticket = FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        if !self.token.is_cancelled() {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }
        ticket
    }

    /// Apply a run's result. Returns whether it landed.
    pub fn complete(&self, ticket: FetchTicket, result: Result<T, String>) -> bool {
        if self.token.is_cancelled() {
            debug!(seq = ticket.seq(), "fetch completion after cancellation dropped");
            return false;
        }
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket.seq() != latest {
            debug!(seq = ticket.seq(), latest, "stale fetch completion dropped");
            return false;
        }

        let mut state = self.lock();
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Err(message) => state.error = Some(message),
        }
        state.loading = false;
        true
    }

    /// Run the producer once and apply its result if still current.
    pub async fn refetch(&self) -> bool {
        let ticket = self.begin();
        let result = (self.producer)().await;
        self.complete(ticket, result)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FetchState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn extract_message<E: UserFacing>(err: &E) -> String {
    let message = err.user_message();
    if message.trim().is_empty() {
        GENERIC_FETCH_ERROR.to_string()
    } else {
        message
    }
}
