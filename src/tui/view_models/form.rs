//! # Form Session
//!
//! Three labeled inputs followed by Cancel and Submit controls. Focus walks
//! a ring of five slots: the fields first, then the two controls.

use crate::api::NewEntry;
use crate::config::{FROM_CHAR_LIMIT, MESSAGE_CHAR_LIMIT, SUBJECT_CHAR_LIMIT};
use crate::tui::models::TextField;

/// Number of text inputs in the form
pub const FIELD_COUNT: usize = 3;

/// Focus slots: every field plus Cancel and Submit
pub const FOCUS_SLOTS: usize = FIELD_COUNT + 2;

pub const FROM_FIELD: usize = 0;
pub const SUBJECT_FIELD: usize = 1;
pub const MESSAGE_FIELD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Cancelled,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(usize),
    Cancel,
    Submit,
}

impl FocusTarget {
    fn from_index(index: usize) -> Self {
        match index {
            i if i < FIELD_COUNT => FocusTarget::Field(i),
            i if i == FIELD_COUNT => FocusTarget::Cancel,
            _ => FocusTarget::Submit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    fields: [TextField; FIELD_COUNT],
    focus: usize,
    state: FormState,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            fields: [
                TextField::new("From (email): ", "user@example.com", FROM_CHAR_LIMIT),
                TextField::new("Subject:      ", "My subject", SUBJECT_CHAR_LIMIT),
                TextField::new("Message:      ", "Message", MESSAGE_CHAR_LIMIT),
            ],
            focus: 0,
            state: FormState::Editing,
        }
    }

    /// Create a form with pre-filled values, e.g. from command line flags
    pub fn with_values(from: Option<&str>, subject: Option<&str>, message: Option<&str>) -> Self {
        let mut form = Self::new();
        for (index, value) in [from, subject, message].into_iter().enumerate() {
            if let Some(value) = value {
                form.fields[index].set_value(value);
            }
        }
        form
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&TextField> {
        self.fields.get(index)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_target(&self) -> FocusTarget {
        FocusTarget::from_index(self.focus)
    }

    pub fn is_focused(&self, target: FocusTarget) -> bool {
        self.focus_target() == target
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_exited(&self) -> bool {
        self.state != FormState::Editing
    }

    /// The three values as a record candidate
    pub fn entry(&self) -> NewEntry {
        NewEntry::new(
            self.fields[FROM_FIELD].value(),
            self.fields[SUBJECT_FIELD].value(),
            self.fields[MESSAGE_FIELD].value(),
        )
    }

    /// Focused field, if editing and focus is on a field
    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        if self.state != FormState::Editing {
            return None;
        }
        self.fields.get_mut(self.focus)
    }

    /// Run an edit against the focused field only
    pub fn edit<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut TextField) -> bool,
    {
        self.focused_field_mut().map(op).unwrap_or(false)
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        self.edit(|field| field.insert_char(ch))
    }

    // === Focus ===

    /// Advance focus, wrapping from Submit back to the first field
    pub fn focus_next(&mut self) -> usize {
        self.set_focus((self.focus + 1) % FOCUS_SLOTS)
    }

    /// Move focus back, wrapping from the first field to Submit
    pub fn focus_prev(&mut self) -> usize {
        self.set_focus((self.focus + FOCUS_SLOTS - 1) % FOCUS_SLOTS)
    }

    fn set_focus(&mut self, focus: usize) -> usize {
        if self.state == FormState::Editing {
            tracing::trace!("Form focus {} -> {}", self.focus, focus);
            self.focus = focus;
        }
        self.focus
    }

    /// Enter: advance on a field, otherwise trigger the focused control
    pub fn activate(&mut self) {
        match self.focus_target() {
            FocusTarget::Field(_) => {
                self.focus_next();
            }
            FocusTarget::Cancel => self.cancel(),
            FocusTarget::Submit => self.submit(),
        }
    }

    pub fn cancel(&mut self) {
        if self.state == FormState::Editing {
            tracing::debug!("Form cancelled");
            self.state = FormState::Cancelled;
        }
    }

    pub fn submit(&mut self) {
        if self.state == FormState::Editing {
            tracing::debug!("Form submitted");
            self.state = FormState::Submitted;
        }
    }
}
