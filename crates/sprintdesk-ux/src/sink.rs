//! Where user-facing failure messages go.

use sprintdesk_transport::ApiError;
use std::sync::Mutex;

/// Page-level error surface (banner, modal, stderr).
pub trait ErrorSink: Send + Sync {
    fn report(&self, message: &str);
}

/// An error that knows the message a user should see.
pub trait UserFacing {
    fn user_message(&self) -> String;
}

impl UserFacing for ApiError {
    fn user_message(&self) -> String {
        ApiError::user_message(self).to_string()
    }
}

impl UserFacing for String {
    fn user_message(&self) -> String {
        self.clone()
    }
}

impl UserFacing for &str {
    fn user_message(&self) -> String {
        (*self).to_string()
    }
}

/// Sink that keeps every message, in order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

impl ErrorSink for CollectingSink {
    fn report(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ErrorSink for NullSink {
    fn report(&self, _message: &str) {}
}
