//! # ViewModel Module
//!
//! The two interactive state machines and the tagged variant the
//! controller dispatches over.

pub mod form;
pub mod table;

pub use form::{FocusTarget, FormSession, FormState, FIELD_COUNT, FOCUS_SLOTS};
pub use table::{TableSession, TableState};

use crate::api::NewEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line notice shown under the active view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// The session that currently owns the terminal
#[derive(Debug, Clone)]
pub enum ActiveSession {
    Table(TableSession),
    Form(FormSession),
    None,
}

impl ActiveSession {
    /// True once the session reached a terminal state (or there is none)
    pub fn is_exited(&self) -> bool {
        match self {
            ActiveSession::Table(table) => table.is_exited(),
            ActiveSession::Form(form) => form.is_exited(),
            ActiveSession::None => true,
        }
    }

    /// What the session ended with
    pub fn outcome(&self) -> SessionOutcome {
        match self {
            ActiveSession::Form(form) if form.state() == FormState::Submitted => {
                SessionOutcome::Submitted(form.entry())
            }
            ActiveSession::Form(_) => SessionOutcome::Cancelled,
            ActiveSession::Table(_) | ActiveSession::None => SessionOutcome::Quit,
        }
    }
}

/// Result of running a session to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The table session was left
    Quit,
    /// The form was abandoned; nothing to submit
    Cancelled,
    /// The form was submitted with these values
    Submitted(NewEntry),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_session_should_count_as_exited() {
        assert!(ActiveSession::None.is_exited());
        assert_eq!(ActiveSession::None.outcome(), SessionOutcome::Quit);
    }

    #[test]
    fn form_outcome_should_follow_state() {
        let mut form = FormSession::with_values(Some("a@b.com"), Some("Hi"), Some("test"));
        assert!(!ActiveSession::Form(form.clone()).is_exited());
        assert_eq!(
            ActiveSession::Form(form.clone()).outcome(),
            SessionOutcome::Cancelled
        );

        form.submit();
        assert_eq!(
            ActiveSession::Form(form).outcome(),
            SessionOutcome::Submitted(NewEntry::new("a@b.com", "Hi", "test"))
        );
    }
}
