//! # Table Commands
//!
//! Bindings for the browse table: vim-style and arrow navigation, delete,
//! refresh and quit.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, SessionKind, TableMovement};

fn in_table(context: &CommandContext) -> bool {
    context.session == SessionKind::Table
}

fn is_plain(event: &KeyEvent) -> bool {
    !event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Map a key to a table movement, if it is one
fn movement_for(event: &KeyEvent) -> Option<TableMovement> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let movement = match event.code {
        KeyCode::Char('u') if ctrl => TableMovement::HalfPageUp,
        KeyCode::Char('d') if ctrl => TableMovement::HalfPageDown,
        _ if !is_plain(event) => return None,
        KeyCode::Up | KeyCode::Char('k') => TableMovement::Up,
        KeyCode::Down | KeyCode::Char('j') => TableMovement::Down,
        KeyCode::PageUp | KeyCode::Char('b') => TableMovement::PageUp,
        KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => TableMovement::PageDown,
        KeyCode::Char('u') => TableMovement::HalfPageUp,
        KeyCode::Char('d') => TableMovement::HalfPageDown,
        KeyCode::Home | KeyCode::Char('g') => TableMovement::Top,
        KeyCode::End | KeyCode::Char('G') => TableMovement::Bottom,
        _ => return None,
    };
    Some(movement)
}

/// Move the selection
pub struct TableNavigationCommand;

impl Command for TableNavigationCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_table(context) && movement_for(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(movement_for(&event)
            .map(|movement| vec![CommandEvent::TableMoveRequested { movement }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "TableNavigation"
    }
}

/// Delete the selected row (x or Delete)
pub struct TableDeleteCommand;

impl Command for TableDeleteCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_table(context)
            && is_plain(event)
            && matches!(event.code, KeyCode::Char('x') | KeyCode::Delete)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::DeleteRequested])
    }

    fn name(&self) -> &'static str {
        "TableDelete"
    }
}

/// Re-fetch every page (r)
pub struct TableRefreshCommand;

impl Command for TableRefreshCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_table(context) && is_plain(event) && event.code == KeyCode::Char('r')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::RefreshRequested])
    }

    fn name(&self) -> &'static str {
        "TableRefresh"
    }
}

/// Leave the table (q or Esc)
pub struct TableQuitCommand;

impl Command for TableQuitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_table(context)
            && is_plain(event)
            && matches!(event.code, KeyCode::Char('q') | KeyCode::Esc)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "TableQuit"
    }
}
