//! # Form Commands
//!
//! Bindings for the new-submission form: focus cycling, Enter on the
//! controls, Escape, and line editing inside the focused field.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, FieldEdit, FocusDirection, SessionKind};
use crate::tui::view_models::FocusTarget;

fn in_form(context: &CommandContext) -> bool {
    context.session == SessionKind::Form
}

fn focus_direction(event: &KeyEvent) -> Option<FocusDirection> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Tab | KeyCode::Down => Some(FocusDirection::Next),
        KeyCode::BackTab | KeyCode::Up => Some(FocusDirection::Previous),
        KeyCode::Char('n') if ctrl => Some(FocusDirection::Next),
        KeyCode::Char('p') if ctrl => Some(FocusDirection::Previous),
        _ => None,
    }
}

fn field_edit(event: &KeyEvent) -> Option<FieldEdit> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    let edit = match event.code {
        KeyCode::Char('a') if ctrl => FieldEdit::Home,
        KeyCode::Char('e') if ctrl => FieldEdit::End,
        KeyCode::Char('u') if ctrl => FieldEdit::DeleteToStart,
        KeyCode::Char('k') if ctrl => FieldEdit::DeleteToEnd,
        KeyCode::Char('h') if ctrl => FieldEdit::Backspace,
        KeyCode::Char(ch) if !ctrl && !alt => FieldEdit::Insert(ch),
        KeyCode::Backspace => FieldEdit::Backspace,
        KeyCode::Delete => FieldEdit::Delete,
        KeyCode::Left => FieldEdit::Left,
        KeyCode::Right => FieldEdit::Right,
        KeyCode::Home => FieldEdit::Home,
        KeyCode::End => FieldEdit::End,
        _ => return None,
    };
    Some(edit)
}

/// Abandon the form (Esc)
pub struct FormCancelCommand;

impl Command for FormCancelCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_form(context) && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::CancelRequested])
    }

    fn name(&self) -> &'static str {
        "FormCancel"
    }
}

/// Enter: next field, or press the focused control
pub struct FormActivateCommand;

impl Command for FormActivateCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_form(context) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ActivateRequested])
    }

    fn name(&self) -> &'static str {
        "FormActivate"
    }
}

/// Tab/Shift+Tab, arrows, Ctrl+N/Ctrl+P
pub struct FormFocusCommand;

impl Command for FormFocusCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_form(context) && focus_direction(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(focus_direction(&event)
            .map(|direction| vec![CommandEvent::FocusMoveRequested { direction }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "FormFocus"
    }
}

/// Line editing; only while a field (not a control) has focus
pub struct FormEditCommand;

impl Command for FormEditCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        in_form(context)
            && matches!(context.focus, Some(FocusTarget::Field(_)))
            && field_edit(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(field_edit(&event)
            .map(|edit| vec![CommandEvent::FieldEditRequested { edit }])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "FormEdit"
    }
}
