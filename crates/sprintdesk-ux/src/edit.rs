//! Click-to-edit controller for a single text field.
//!
//! ```text
//! Viewing ──start_editing──▶ Editing ──save──▶ Saving ──ok/err──▶ Viewing
//!    ▲                          │
//!    └──────── Escape ──────────┘
//! ```
//!
//! Outside `Editing`/`Saving` the draft always equals the source value.
//! Saving is two-phase: [`InlineEdit::begin_save`] decides whether a commit is
//! needed, [`InlineEdit::finish_save`] applies its result. [`InlineEdit::save`]
//! runs both around an async commit function.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::sink::{ErrorSink, UserFacing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Viewing,
    Editing,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    SingleLine,
    MultiLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    CtrlEnter,
    ShiftEnter,
    Escape,
}

/// What a key press or blur asks of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditIntent {
    /// Run a save now.
    Save,
    /// A newline was appended to the draft.
    Newline,
    Cancelled,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Committed; the persisted value is the new source.
    Saved,
    /// Trimmed draft equals the source; nothing was sent.
    Unchanged,
    /// Validator rejected the draft; nothing was sent.
    Invalid(String),
    /// Not editing, or a save is already in flight.
    Ignored,
}

impl SaveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveOutcome::Saved => "saved",
            SaveOutcome::Unchanged => "unchanged",
            SaveOutcome::Invalid(_) => "invalid",
            SaveOutcome::Ignored => "ignored",
        }
    }
}

/// Result of the first save phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStep {
    /// Now `Saving`; persist this trimmed value, then call `finish_save`.
    Commit(String),
    Done(SaveOutcome),
}

#[derive(Debug, Error)]
pub enum EditError<E> {
    #[error("commit failed: {0}")]
    Commit(#[source] E),
}

impl<E> EditError<E> {
    pub fn into_inner(self) -> E {
        match self {
            EditError::Commit(err) => err,
        }
    }
}

/// Returns a message when the trimmed draft is not acceptable.
pub type Validator = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct InlineEdit {
    source: String,
    draft: String,
    phase: EditPhase,
    kind: FieldKind,
    placeholder: String,
    validator: Option<Validator>,
    sink: Arc<dyn ErrorSink>,
}

impl fmt::Debug for InlineEdit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("InlineEdit")
            .field("source", &self.source)
            .field("draft", &self.draft)
            .field("phase", &self.phase)
            .field("kind", &self.kind)
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl InlineEdit {
    /// A missing source value edits as the empty string.
    pub fn new(source: Option<&str>, sink: Arc<dyn ErrorSink>) -> Self {
        let source = source.unwrap_or_default().to_string();
        Self {
            draft: source.clone(),
            source,
            phase: EditPhase::Viewing,
            kind: FieldKind::SingleLine,
            placeholder: String::new(),
            validator: None,
            sink,
        }
    }

    pub fn multi_line(mut self) -> Self {
        self.kind = FieldKind::MultiLine;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn is_editing(&self) -> bool {
        self.phase != EditPhase::Viewing
    }

    pub fn is_saving(&self) -> bool {
        self.phase == EditPhase::Saving
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Source value, or the placeholder when it is empty.
    pub fn display_value(&self) -> &str {
        if self.source.is_empty() {
            &self.placeholder
        } else {
            &self.source
        }
    }

    pub fn has_changes(&self) -> bool {
        self.draft.trim() != self.source.trim()
    }

    pub fn start_editing(&mut self) {
        if self.phase == EditPhase::Viewing {
            self.draft = self.source.clone();
            self.phase = EditPhase::Editing;
        }
    }

    /// Replace the draft. Ignored unless editing.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.phase == EditPhase::Editing {
            self.draft = text.into();
        }
    }

    pub fn cancel(&mut self) -> EditIntent {
        if self.phase != EditPhase::Editing {
            return EditIntent::Ignored;
        }
        self.revert();
        EditIntent::Cancelled
    }

    pub fn key(&mut self, key: EditKey) -> EditIntent {
        if self.phase != EditPhase::Editing {
            return EditIntent::Ignored;
        }
        match (key, self.kind) {
            (EditKey::Escape, _) => self.cancel(),
            (EditKey::ShiftEnter, FieldKind::MultiLine) => {
                self.draft.push('\n');
                EditIntent::Newline
            }
            (EditKey::Enter | EditKey::CtrlEnter | EditKey::ShiftEnter, _) => EditIntent::Save,
        }
    }

    /// The key that commits without inserting a newline.
    pub fn commit_key(&self) -> EditKey {
        match self.kind {
            FieldKind::SingleLine => EditKey::Enter,
            FieldKind::MultiLine => EditKey::CtrlEnter,
        }
    }

    /// Handle a key and save only when it asks for one. Keys that do not
    /// commit leave the outcome `Ignored`.
    pub async fn press<F, Fut, E>(
        &mut self,
        key: EditKey,
        commit: F,
    ) -> Result<SaveOutcome, EditError<E>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: UserFacing,
    {
        match self.key(key) {
            EditIntent::Save => self.save(commit).await,
            EditIntent::Newline | EditIntent::Cancelled | EditIntent::Ignored => {
                Ok(SaveOutcome::Ignored)
            }
        }
    }

    /// Losing focus saves.
    pub fn blur(&mut self) -> EditIntent {
        if self.phase == EditPhase::Editing {
            EditIntent::Save
        } else {
            EditIntent::Ignored
        }
    }

    pub fn begin_save(&mut self) -> SaveStep {
        if self.phase != EditPhase::Editing {
            return SaveStep::Done(SaveOutcome::Ignored);
        }

        let candidate = self.draft.trim().to_string();
        if let Some(message) = self.validator.as_ref().and_then(|v| v(&candidate)) {
            debug!(%message, "inline edit rejected by validator");
            self.sink.report(&message);
            self.revert();
            return SaveStep::Done(SaveOutcome::Invalid(message));
        }

        if candidate == self.source.trim() {
            self.revert();
            return SaveStep::Done(SaveOutcome::Unchanged);
        }

        self.phase = EditPhase::Saving;
        SaveStep::Commit(candidate)
    }

    /// Apply the commit result. `Ok` carries the value the server stored.
    pub fn finish_save<E: UserFacing>(
        &mut self,
        result: Result<String, E>,
    ) -> Result<SaveOutcome, EditError<E>> {
        if self.phase != EditPhase::Saving {
            return Ok(SaveOutcome::Ignored);
        }
        match result {
            Ok(persisted) => {
                self.source = persisted;
                self.revert();
                Ok(SaveOutcome::Saved)
            }
            Err(err) => {
                self.revert();
                self.sink.report(&err.user_message());
                Err(EditError::Commit(err))
            }
        }
    }

    pub async fn save<F, Fut, E>(&mut self, commit: F) -> Result<SaveOutcome, EditError<E>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: UserFacing,
    {
        match self.begin_save() {
            SaveStep::Done(outcome) => Ok(outcome),
            SaveStep::Commit(value) => {
                let result = commit(value).await;
                self.finish_save(result)
            }
        }
    }

    /// The source changed elsewhere (refetch, another editor).
    pub fn sync_source(&mut self, source: Option<&str>) {
        self.source = source.unwrap_or_default().to_string();
        if self.phase == EditPhase::Viewing {
            self.draft = self.source.clone();
        }
    }

    fn revert(&mut self) {
        self.draft = self.source.clone();
        self.phase = EditPhase::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CollectingSink;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn editor(source: &str) -> (InlineEdit, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::new());
        (InlineEdit::new(Some(source), sink.clone()), sink)
    }

    #[test]
    fn escape_discards_the_draft() {
        let (mut edit, sink) = editor("Fix bug");
        edit.start_editing();
        edit.set_draft("Something else");
        assert!(edit.has_changes());

        assert_eq!(edit.key(EditKey::Escape), EditIntent::Cancelled);
        assert_eq!(edit.phase(), EditPhase::Viewing);
        assert_eq!(edit.draft(), "Fix bug");
        assert_eq!(edit.source(), "Fix bug");
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn press_saves_only_when_the_key_commits() {
        let (mut edit, _) = editor("Notes");
        let mut edit_multi =
            InlineEdit::new(Some("Notes"), Arc::new(CollectingSink::new())).multi_line();
        let calls = AtomicUsize::new(0);

        edit_multi.start_editing();
        edit_multi.set_draft("More notes");
        let outcome = edit_multi
            .press(EditKey::ShiftEnter, |value| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(value) }
            })
            .await
            .expect("newline is not an error");
        assert_eq!(outcome, SaveOutcome::Ignored);
        assert_eq!(edit_multi.draft(), "More notes\n");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let commit_key = edit_multi.commit_key();
        assert_eq!(commit_key, EditKey::CtrlEnter);
        let outcome = edit_multi
            .press(commit_key, |value| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(value) }
            })
            .await
            .expect("save");
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(edit_multi.source(), "More notes");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        edit.start_editing();
        edit.set_draft("Other");
        let outcome = edit
            .press(EditKey::Escape, |value| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(value) }
            })
            .await
            .expect("cancel is not an error");
        assert_eq!(outcome, SaveOutcome::Ignored);
        assert_eq!(edit.source(), "Notes");
        assert_eq!(edit.phase(), EditPhase::Viewing);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let enter = edit.commit_key();
        let outcome = edit
            .press(enter, |value| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(value) }
            })
            .await
            .expect("viewing ignores keys");
        assert_eq!(outcome, SaveOutcome::Ignored);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn whitespace_only_change_makes_no_call() {
        let (mut edit, _) = editor("Fix bug");
        let calls = AtomicUsize::new(0);
        edit.start_editing();
        edit.set_draft("  Fix bug  ");

        let outcome = edit
            .save(|value| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(value) }
            })
            .await
            .expect("no-op save is not an error");

        assert_eq!(outcome, SaveOutcome::Unchanged);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(edit.phase(), EditPhase::Viewing);
        assert_eq!(edit.draft(), "Fix bug");
    }

    #[tokio::test]
    async fn validator_blocks_the_call_and_reports() {
        let sink = Arc::new(CollectingSink::new());
        let mut edit = InlineEdit::new(Some("Fix bug"), sink.clone()).with_validator(|v| {
            v.is_empty().then(|| "Title cannot be empty".to_string())
        });
        let calls = AtomicUsize::new(0);
        edit.start_editing();
        edit.set_draft("   ");

        let outcome = edit
            .save(|value| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(value) }
            })
            .await
            .expect("validation failure is reported, not returned");

        assert_eq!(outcome, SaveOutcome::Invalid("Title cannot be empty".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(edit.draft(), "Fix bug");
        assert_eq!(edit.phase(), EditPhase::Viewing);
        assert_eq!(sink.messages(), vec!["Title cannot be empty".to_string()]);
    }

    #[tokio::test]
    async fn rejected_commit_reverts_reports_and_propagates() {
        let (mut edit, sink) = editor("Fix bug");
        edit.start_editing();
        edit.set_draft("Fix the bug");

        let err = edit
            .save(|_| async { Err::<String, _>("Issue not found".to_string()) })
            .await
            .expect_err("commit failure propagates");

        assert_eq!(err.into_inner(), "Issue not found");
        assert_eq!(edit.display_value(), "Fix bug");
        assert_eq!(edit.draft(), "Fix bug");
        assert_eq!(edit.phase(), EditPhase::Viewing);
        assert_eq!(sink.last().as_deref(), Some("Issue not found"));
    }

    #[tokio::test]
    async fn successful_commit_adopts_the_persisted_value() {
        let (mut edit, _) = editor("fix bug");
        edit.start_editing();
        edit.set_draft("  fix login bug ");

        let outcome = edit
            .save(|value| async move {
                assert_eq!(value, "fix login bug");
                Ok::<_, String>("Fix login bug".to_string())
            })
            .await
            .expect("save");

        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(edit.source(), "Fix login bug");
        assert_eq!(edit.draft(), "Fix login bug");
        assert!(!edit.has_changes());
    }

    #[test]
    fn save_while_saving_is_ignored() {
        let (mut edit, _) = editor("a");
        edit.start_editing();
        edit.set_draft("b");

        assert_eq!(edit.begin_save(), SaveStep::Commit("b".to_string()));
        assert!(edit.is_saving());
        assert_eq!(edit.begin_save(), SaveStep::Done(SaveOutcome::Ignored));
        assert_eq!(edit.blur(), EditIntent::Ignored);
        assert_eq!(edit.key(EditKey::Escape), EditIntent::Ignored);

        let outcome = edit.finish_save(Ok::<_, String>("b".to_string()));
        assert_eq!(outcome.expect("finish"), SaveOutcome::Saved);
        assert_eq!(edit.source(), "b");
    }

    #[test]
    fn key_bindings_follow_field_kind() {
        let (mut single, _) = editor("x");
        single.start_editing();
        assert_eq!(single.key(EditKey::Enter), EditIntent::Save);
        assert_eq!(single.key(EditKey::ShiftEnter), EditIntent::Save);
        assert_eq!(single.blur(), EditIntent::Save);

        let sink = Arc::new(CollectingSink::new());
        let mut multi = InlineEdit::new(Some("line"), sink).multi_line();
        multi.start_editing();
        assert_eq!(multi.key(EditKey::ShiftEnter), EditIntent::Newline);
        assert_eq!(multi.draft(), "line\n");
        assert_eq!(multi.key(EditKey::CtrlEnter), EditIntent::Save);
    }

    #[test]
    fn placeholder_and_external_sync() {
        let sink = Arc::new(CollectingSink::new());
        let mut edit = InlineEdit::new(None, sink).with_placeholder("Add a description...");
        assert_eq!(edit.display_value(), "Add a description...");

        edit.sync_source(Some("Loaded"));
        assert_eq!(edit.draft(), "Loaded");

        edit.start_editing();
        edit.set_draft("Typing");
        edit.sync_source(Some("Changed elsewhere"));
        assert_eq!(edit.draft(), "Typing");
        assert_eq!(edit.display_value(), "Changed elsewhere");
    }
}
