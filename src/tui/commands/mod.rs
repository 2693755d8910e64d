//! # Command Infrastructure
//!
//! Key bindings live in small [`Command`] implementations. Each command
//! decides whether a key is relevant for the active session and turns it
//! into [`CommandEvent`]s; the [`CommandRegistry`] runs the first match.

pub mod app;
pub mod events;
pub mod form;
pub mod table;

pub use events::{CommandEvent, FieldEdit, FocusDirection, TableMovement};

use crate::tui::view_models::{ActiveSession, FocusTarget};
use anyhow::Result;
use crossterm::event::KeyEvent;

/// Which session is receiving input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Table,
    Form,
    None,
}

/// Read-only snapshot of the active session for commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub session: SessionKind,
    pub focus: Option<FocusTarget>,
}

impl CommandContext {
    pub fn new(session: SessionKind, focus: Option<FocusTarget>) -> Self {
        Self { session, focus }
    }

    /// Snapshot the session the controller currently owns
    pub fn from_session(session: &ActiveSession) -> Self {
        match session {
            ActiveSession::Table(_) => Self::new(SessionKind::Table, None),
            ActiveSession::Form(form) => Self::new(SessionKind::Form, Some(form.focus_target())),
            ActiveSession::None => Self::new(SessionKind::None, None),
        }
    }
}

/// A key binding: relevance check plus the events it produces
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in `context`
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events for `event`
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Command name for logging
    fn name(&self) -> &'static str;
}

/// Ordered set of commands; the first relevant one wins
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with every default binding
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Ctrl+C must win over every session binding
        self.add_command(Box::new(app::AppTerminateCommand));

        self.add_command(Box::new(table::TableQuitCommand));
        self.add_command(Box::new(table::TableDeleteCommand));
        self.add_command(Box::new(table::TableRefreshCommand));
        self.add_command(Box::new(table::TableNavigationCommand));

        self.add_command(Box::new(form::FormCancelCommand));
        self.add_command(Box::new(form::FormActivateCommand));
        self.add_command(Box::new(form::FormFocusCommand));
        self.add_command(Box::new(form::FormEditCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Turn a key event into command events. Unbound keys yield nothing.
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        match self
            .commands
            .iter()
            .find(|command| command.is_relevant(context, &event))
        {
            Some(command) => {
                tracing::debug!("Key {:?} handled by {}", event.code, command.name());
                command.execute(event, context)
            }
            None => {
                tracing::trace!("No command for key {:?} in {:?}", event, context.session);
                Ok(Vec::new())
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    pub fn table_context() -> CommandContext {
        CommandContext::new(SessionKind::Table, None)
    }

    pub fn form_context(focus: FocusTarget) -> CommandContext {
        CommandContext::new(SessionKind::Form, Some(focus))
    }
}
