//! # Table Session
//!
//! Browse state for the fetched submissions: the row set, a selection
//! cursor and a fixed-height viewport, plus the delete and refresh
//! round-trips. Network calls are made by the controller; this type only
//! records which one is in flight and absorbs its result.

use super::StatusMessage;
use crate::api::{ClientError, Entry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    Browsing,
    AwaitingRefresh,
    AwaitingDelete { id: String },
    Exited,
}

#[derive(Debug, Clone)]
pub struct TableSession {
    rows: Vec<Entry>,
    cursor: usize,
    offset: usize,
    height: usize,
    state: TableState,
    status: Option<StatusMessage>,
    last_deleted: Option<String>,
}

impl TableSession {
    /// Create a session over an initial sweep result
    pub fn new(rows: Vec<Entry>, height: usize) -> Self {
        Self {
            rows,
            cursor: 0,
            offset: 0,
            height: height.max(1),
            state: TableState::Browsing,
            status: None,
            last_deleted: None,
        }
    }

    pub fn rows(&self) -> &[Entry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Selected row index, `None` for an empty table
    pub fn cursor(&self) -> Option<usize> {
        (!self.rows.is_empty()).then_some(self.cursor)
    }

    /// Index of the first visible row
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_exited(&self) -> bool {
        self.state == TableState::Exited
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.cursor().and_then(|i| self.rows.get(i))
    }

    /// Rows inside the viewport
    pub fn visible_rows(&self) -> &[Entry] {
        let end = (self.offset + self.height).min(self.rows.len());
        &self.rows[self.offset.min(end)..end]
    }

    fn is_browsing(&self) -> bool {
        self.state == TableState::Browsing
    }

    // === Cursor movement ===

    pub fn move_up(&mut self, amount: usize) -> bool {
        self.set_cursor(self.cursor.saturating_sub(amount))
    }

    pub fn move_down(&mut self, amount: usize) -> bool {
        self.set_cursor(self.cursor.saturating_add(amount))
    }

    pub fn page_up(&mut self) -> bool {
        self.move_up(self.height)
    }

    pub fn page_down(&mut self) -> bool {
        self.move_down(self.height)
    }

    pub fn half_page_up(&mut self) -> bool {
        self.move_up((self.height / 2).max(1))
    }

    pub fn half_page_down(&mut self) -> bool {
        self.move_down((self.height / 2).max(1))
    }

    pub fn goto_top(&mut self) -> bool {
        self.set_cursor(0)
    }

    pub fn goto_bottom(&mut self) -> bool {
        self.set_cursor(usize::MAX)
    }

    /// Move the selection, clamped to the row set. Returns whether it moved.
    fn set_cursor(&mut self, target: usize) -> bool {
        if !self.is_browsing() || self.rows.is_empty() {
            return false;
        }
        let old = self.cursor;
        self.cursor = target.min(self.rows.len() - 1);
        self.scroll_to_cursor();
        if old == self.cursor {
            return false;
        }
        // A notice is shown until the selection moves on
        self.status = None;
        true
    }

    /// Keep the cursor in range and inside the viewport
    fn clamp(&mut self) {
        if self.rows.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(self.rows.len() - 1);
        self.offset = self.offset.min(self.rows.len().saturating_sub(self.height));
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
    }

    // === Server round-trips ===

    /// Enter `AwaitingDelete` for the selected row and return its id
    pub fn begin_delete(&mut self) -> Option<String> {
        if !self.is_browsing() {
            return None;
        }
        let id = self.selected()?.id.clone();
        tracing::debug!("Deleting entry {}", id);
        self.state = TableState::AwaitingDelete { id: id.clone() };
        Some(id)
    }

    /// Absorb a delete result. Returns true when a refresh sweep must follow.
    pub fn finish_delete(&mut self, result: Result<(), ClientError>) -> bool {
        let TableState::AwaitingDelete { id } = &self.state else {
            tracing::warn!("finish_delete called in state {:?}", self.state);
            return false;
        };
        let id = id.clone();

        match result {
            Ok(()) => {
                self.last_deleted = Some(id);
                self.state = TableState::AwaitingRefresh;
                true
            }
            Err(e) => {
                tracing::warn!("Delete of {} failed: {}", id, e);
                self.status = Some(StatusMessage::error(e.to_string()));
                self.state = TableState::Browsing;
                false
            }
        }
    }

    /// Enter `AwaitingRefresh`. Returns false when not browsing.
    pub fn begin_refresh(&mut self) -> bool {
        if !self.is_browsing() {
            return false;
        }
        self.state = TableState::AwaitingRefresh;
        true
    }

    /// Absorb a sweep result; a failed sweep keeps the current rows
    pub fn finish_refresh(&mut self, result: Result<Vec<Entry>, ClientError>) {
        if self.state != TableState::AwaitingRefresh {
            tracing::warn!("finish_refresh called in state {:?}", self.state);
            return;
        }
        self.state = TableState::Browsing;
        let deleted = self.last_deleted.take();

        match result {
            Ok(rows) => {
                self.rows = rows;
                self.clamp();
                let message = match deleted {
                    Some(id) => format!("Deleted {} ({} left)", id, self.rows.len()),
                    None => format!("Loaded {} entries", self.rows.len()),
                };
                self.status = Some(StatusMessage::info(message));
            }
            Err(e) => {
                tracing::warn!("Refresh failed: {}", e);
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    pub fn quit(&mut self) {
        self.state = TableState::Exited;
    }
}
