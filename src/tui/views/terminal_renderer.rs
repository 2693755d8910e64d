//! # Session Renderer
//!
//! Every frame is drawn from scratch: clear, paint the session, flush.
//! Styling is queued with crossterm onto the render stream itself.

use crate::api::Entry;
use crate::tui::io::RenderStream;
use crate::tui::view_models::{
    ActiveSession, FocusTarget, FormSession, StatusMessage, TableSession, TableState,
};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

const FOCUSED: Color = Color::AnsiValue(205);
const BLURRED: Color = Color::AnsiValue(240);
const SELECTED_FG: Color = Color::AnsiValue(229);
const SELECTED_BG: Color = Color::AnsiValue(57);
const ERROR: Color = Color::AnsiValue(196);

/// Column titles and display widths of the browse table
const COLUMNS: [(&str, usize); 4] = [("ID", 5), ("From", 15), ("Subject", 15), ("Message", 30)];

const TABLE_HELP: &str =
    "↑/k up • ↓/j down • pgup/pgdn page • g/G top/bottom • x delete • r refresh • q quit";
const FORM_HELP: &str = "(enter & arrow keys, ctrl+c to exit)";

/// Truncate `text` to `width` display columns, ending in "…" when cut, and
/// pad the rest with spaces. Control characters render as spaces.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();

    if flat.width() <= width {
        let pad = width - flat.width();
        return format!("{flat}{}", " ".repeat(pad));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in flat.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// The part of a field value that fits in `width` columns while keeping
/// the cursor on screen, and the cursor's column within it. The window
/// scrolls just far enough to show the cursor, like a one-line text input.
pub fn scroll_window(value: &str, cursor: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    let cursor = cursor.min(chars.len());
    let width = width.max(1);
    let char_width = |ch: &char| ch.width().unwrap_or(0);

    // Leave one column for the cursor itself
    let mut start = 0;
    let mut span: usize = chars[..cursor].iter().map(char_width).sum();
    while start < cursor && span >= width {
        span -= char_width(&chars[start]);
        start += 1;
    }

    let mut shown = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = char_width(ch);
        if used + w > width {
            break;
        }
        shown.push(*ch);
        used += w;
    }
    (shown, span)
}

fn table_line(cells: [&str; 4]) -> String {
    COLUMNS
        .iter()
        .zip(cells)
        .map(|((_, width), cell)| format!(" {} ", fit_to_width(cell, *width)))
        .collect()
}

fn table_width() -> usize {
    COLUMNS.iter().map(|(_, width)| width + 2).sum()
}

/// Renders sessions to an injected stream
pub struct SessionRenderer<RS: RenderStream> {
    stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> SessionRenderer<RS> {
    pub fn with_render_stream(stream: RS) -> Result<Self> {
        let terminal_size = stream.get_size()?;
        Ok(Self {
            stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn initialize(&mut self) -> Result<()> {
        self.stream.enable_raw_mode()?;
        self.stream.enter_alternate_screen()?;
        self.stream.hide_cursor()?;
        Ok(())
    }

    /// Undo everything `initialize` did, in reverse
    pub fn cleanup(&mut self) -> Result<()> {
        self.stream.show_cursor()?;
        self.stream.leave_alternate_screen()?;
        self.stream.disable_raw_mode()?;
        Ok(())
    }

    pub fn render(&mut self, session: &ActiveSession) -> Result<()> {
        self.stream.clear_screen()?;
        match session {
            ActiveSession::Table(table) => self.render_table(table)?,
            ActiveSession::Form(form) => self.render_form(form)?,
            ActiveSession::None => {}
        }
        self.stream.flush()?;
        Ok(())
    }

    // === Table ===

    fn render_table(&mut self, table: &TableSession) -> Result<()> {
        self.stream.hide_cursor()?;
        let mut row: u16 = 0;

        let header = table_line(COLUMNS.map(|(title, _)| title));
        queue_term!(self.stream, MoveTo(0, row), Print(header))?;
        row += 1;
        queue_term!(
            self.stream,
            MoveTo(0, row),
            SetForegroundColor(BLURRED),
            Print("─".repeat(table_width())),
            ResetColor
        )?;
        row += 1;

        let selected = table.cursor();
        for (index, entry) in table.visible_rows().iter().enumerate() {
            let is_selected = selected == Some(table.offset() + index);
            self.render_table_row(row, entry, is_selected)?;
            row += 1;
        }
        // Keep the help line at a fixed position on short tables
        row = row.max(2 + table.height() as u16);

        row += 1;
        if let Some(status) = Self::table_status(table) {
            self.render_status(row, &status)?;
        }
        row += 1;
        queue_term!(
            self.stream,
            MoveTo(0, row),
            SetForegroundColor(BLURRED),
            Print(TABLE_HELP),
            ResetColor
        )?;
        Ok(())
    }

    fn table_status(table: &TableSession) -> Option<StatusMessage> {
        match table.state() {
            TableState::AwaitingDelete { id } => Some(StatusMessage::info(format!("Deleting {id}…"))),
            TableState::AwaitingRefresh => Some(StatusMessage::info("Refreshing…")),
            _ if table.is_empty() && table.status().is_none() => {
                Some(StatusMessage::info("No submissions found"))
            }
            _ => table.status().cloned(),
        }
    }

    fn render_table_row(&mut self, row: u16, entry: &Entry, selected: bool) -> Result<()> {
        let line = table_line([
            entry.id.as_str(),
            entry.from.as_str(),
            entry.subject.as_str(),
            entry.message.as_str(),
        ]);
        queue_term!(self.stream, MoveTo(0, row))?;
        if selected {
            queue_term!(
                self.stream,
                SetForegroundColor(SELECTED_FG),
                SetBackgroundColor(SELECTED_BG),
                Print(line),
                ResetColor
            )
        } else {
            queue_term!(self.stream, Print(line))
        }
    }

    fn render_status(&mut self, row: u16, status: &StatusMessage) -> Result<()> {
        let color = if status.is_error() { ERROR } else { FOCUSED };
        let width = self.terminal_size.0.max(1) as usize;
        queue_term!(
            self.stream,
            MoveTo(0, row),
            SetForegroundColor(color),
            Print(fit_to_width(&status.text, width).trim_end()),
            ResetColor
        )
    }

    // === Form ===

    fn render_form(&mut self, form: &FormSession) -> Result<()> {
        let mut cursor_at = None;

        let screen_width = self.terminal_size.0.max(1) as usize;

        for (index, field) in form.fields().iter().enumerate() {
            let row = index as u16;
            let focused = form.is_focused(FocusTarget::Field(index));
            let room = screen_width.saturating_sub(field.prompt().width()).max(1);
            queue_term!(self.stream, MoveTo(0, row))?;

            if focused {
                queue_term!(self.stream, SetForegroundColor(FOCUSED), Print(field.prompt()))?;
            } else {
                queue_term!(self.stream, Print(field.prompt()))?;
            }

            if field.is_empty() {
                queue_term!(
                    self.stream,
                    SetForegroundColor(BLURRED),
                    Print(fit_to_width(field.placeholder(), room).trim_end()),
                    ResetColor
                )?;
            } else {
                let cursor = if focused { field.cursor() } else { 0 };
                let (shown, _) = scroll_window(&field.value(), cursor, room);
                queue_term!(self.stream, Print(shown), ResetColor)?;
            }

            if focused {
                let (_, offset) = scroll_window(&field.value(), field.cursor(), room);
                let column = field.prompt().width() + offset;
                cursor_at = Some((column.min(screen_width - 1) as u16, row));
            }
        }

        let buttons_row = form.fields().len() as u16 + 1;
        queue_term!(self.stream, MoveTo(0, buttons_row))?;
        self.render_button("Cancel", form.is_focused(FocusTarget::Cancel))?;
        queue_term!(self.stream, Print(" "))?;
        self.render_button("Submit", form.is_focused(FocusTarget::Submit))?;

        queue_term!(
            self.stream,
            MoveTo(0, buttons_row + 2),
            SetForegroundColor(BLURRED),
            Print(FORM_HELP),
            ResetColor
        )?;

        match cursor_at {
            Some((x, y)) => {
                self.stream.move_cursor(x, y)?;
                self.stream.show_cursor()?;
            }
            None => self.stream.hide_cursor()?,
        }
        Ok(())
    }

    fn render_button(&mut self, label: &str, focused: bool) -> Result<()> {
        if focused {
            queue_term!(
                self.stream,
                SetForegroundColor(FOCUSED),
                SetAttribute(Attribute::Bold),
                Print(format!("[ {label} ]")),
                SetAttribute(Attribute::Reset),
                ResetColor
            )
        } else {
            queue_term!(
                self.stream,
                Print("[ "),
                SetForegroundColor(BLURRED),
                Print(label),
                ResetColor,
                Print(" ]")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::io::{MockRenderStream, RenderCommand};

    fn entry(id: &str, message: &str) -> Entry {
        Entry {
            id: id.to_string(),
            from: "a@b.com".to_string(),
            subject: "Hi".to_string(),
            message: message.to_string(),
        }
    }

    fn draw(session: &ActiveSession) -> MockRenderStream {
        let stream = MockRenderStream::new();
        let mut renderer = SessionRenderer::with_render_stream(stream.clone()).unwrap();
        renderer.render(session).unwrap();
        stream
    }

    #[test]
    fn fit_should_pad_short_text() {
        assert_eq!(fit_to_width("ab", 5), "ab   ");
    }

    #[test]
    fn fit_should_truncate_with_ellipsis() {
        assert_eq!(fit_to_width("abcdefgh", 5), "abcd…");
        assert_eq!(fit_to_width("line\nbreak", 10), "line break");
    }

    #[test]
    fn fit_should_count_wide_characters() {
        // Each ideograph is two columns wide
        let out = fit_to_width("日本語テキスト", 6);
        assert_eq!(out.width(), 6);
        assert!(out.contains('…'));
    }

    #[test]
    fn table_frame_should_show_header_rows_and_help() {
        let rows = (0..15).map(|i| entry(&i.to_string(), "test")).collect();
        let session = ActiveSession::Table(TableSession::new(rows, 10));
        let text = draw(&session).visible_text();

        assert!(text.contains("ID"));
        assert!(text.contains("Message"));
        assert!(text.contains(" 9 "));
        assert!(!text.contains(" 10 "), "only the viewport is drawn");
        assert!(text.contains("q quit"));
    }

    #[test]
    fn selected_row_should_use_selection_colors() {
        let session = ActiveSession::Table(TableSession::new(vec![entry("1", "x")], 10));
        let raw = draw(&session).raw_frame();
        assert!(raw.contains("\x1b[38;5;229m"));
        assert!(raw.contains("\x1b[48;5;57m"));
    }

    #[test]
    fn empty_table_should_say_so() {
        let session = ActiveSession::Table(TableSession::new(Vec::new(), 10));
        assert!(draw(&session).visible_text().contains("No submissions found"));
    }

    #[test]
    fn form_frame_should_show_placeholders_and_buttons() {
        let session = ActiveSession::Form(FormSession::new());
        let stream = draw(&session);
        let text = stream.visible_text();

        assert!(text.contains("From (email): user@example.com"));
        assert!(text.contains("Subject:      My subject"));
        assert!(text.contains("[ Cancel ] [ Submit ]"));
        assert!(text.contains("(enter & arrow keys, ctrl+c to exit)"));
        // Cursor sits right after the first prompt
        assert!(stream.has_command(&RenderCommand::MoveCursor(14, 0)));
    }

    #[test]
    fn form_frame_should_show_values() {
        let form = FormSession::with_values(Some("me@x.io"), None, None);
        let text = draw(&ActiveSession::Form(form)).visible_text();
        assert!(text.contains("From (email): me@x.io"));
        assert!(!text.contains("user@example.com"));
    }

    #[test]
    fn window_should_scroll_to_keep_cursor_visible() {
        assert_eq!(scroll_window("abc", 3, 10), ("abc".to_string(), 3));
        assert_eq!(scroll_window("abcdef", 6, 4), ("def".to_string(), 3));
        assert_eq!(scroll_window("abcdef", 0, 4), ("abcd".to_string(), 0));
        assert_eq!(scroll_window("abcdef", 2, 4), ("abcd".to_string(), 2));
    }

    #[test]
    fn long_message_should_stay_on_screen() {
        let message = "x".repeat(299) + "z";
        let mut form = FormSession::with_values(None, None, Some(&message));
        form.focus_next();
        form.focus_next();

        let stream = draw(&ActiveSession::Form(form));
        let text = stream.visible_text();
        for line in text.lines() {
            assert!(line.width() <= 80, "line overflows: {} cols", line.width());
        }
        // The tail of the message is what the cursor is next to
        let message_line = text.lines().find(|l| l.starts_with("Message:")).unwrap();
        assert!(message_line.ends_with('z'));

        let moves: Vec<_> = stream
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                RenderCommand::MoveCursor(x, y) => Some((x, y)),
                _ => None,
            })
            .collect();
        assert_eq!(moves, vec![(79, 2)]);
        assert!(text.contains("[ Cancel ] [ Submit ]"));
    }

    #[test]
    fn focused_button_should_hide_the_cursor() {
        let mut form = FormSession::new();
        form.focus_prev();
        let stream = draw(&ActiveSession::Form(form));
        assert!(stream.has_command(&RenderCommand::HideCursor));
        assert!(!stream.has_command(&RenderCommand::ShowCursor));
    }

    #[test]
    fn lifecycle_should_restore_the_terminal() {
        let stream = MockRenderStream::new();
        let mut renderer = SessionRenderer::with_render_stream(stream.clone()).unwrap();
        renderer.initialize().unwrap();
        renderer.cleanup().unwrap();

        assert_eq!(
            stream.commands(),
            vec![
                RenderCommand::EnableRawMode,
                RenderCommand::EnterAlternateScreen,
                RenderCommand::HideCursor,
                RenderCommand::ShowCursor,
                RenderCommand::LeaveAlternateScreen,
                RenderCommand::DisableRawMode,
            ]
        );
    }
}
