//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events and the controller applies them to the
//! active session, performing any server round-trip they imply.

/// Cursor movements available in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMovement {
    Up,
    Down,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
}

/// Edits applied to the focused form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    DeleteToStart,
    DeleteToEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Next,
    Previous,
}

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Move the table selection
    TableMoveRequested { movement: TableMovement },

    /// Delete the selected row on the server, then resync
    DeleteRequested,

    /// Re-fetch every page
    RefreshRequested,

    /// Edit the focused form field
    FieldEditRequested { edit: FieldEdit },

    /// Move form focus
    FocusMoveRequested { direction: FocusDirection },

    /// Enter in the form: advance or trigger the focused control
    ActivateRequested,

    /// Abandon the form
    CancelRequested,

    /// Leave the active session
    QuitRequested,
}
