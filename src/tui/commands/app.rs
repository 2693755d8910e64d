//! # Application Control Commands
//!
//! Bindings shared by every session.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, SessionKind};

/// Leave the active session (Ctrl+C). A form treats it as cancel.
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.session != SessionKind::None
            && matches!(event.code, KeyCode::Char('c'))
            && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::commands::test_support::*;
    use crate::tui::view_models::FocusTarget;

    #[test]
    fn app_terminate_should_be_relevant_for_ctrl_c() {
        let cmd = AppTerminateCommand;
        assert!(cmd.is_relevant(&table_context(), &ctrl('c')));
        assert!(cmd.is_relevant(&form_context(FocusTarget::Field(1)), &ctrl('c')));
    }

    #[test]
    fn app_terminate_should_not_be_relevant_for_regular_c() {
        let cmd = AppTerminateCommand;
        assert!(!cmd.is_relevant(&table_context(), &key(KeyCode::Char('c'))));
        assert!(!cmd.is_relevant(&table_context(), &ctrl('x')));
    }

    #[test]
    fn app_terminate_should_produce_quit_event() {
        let cmd = AppTerminateCommand;
        let events = cmd.execute(ctrl('c'), &table_context()).unwrap();
        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }
}
