//! # Scripted I/O
//!
//! Streams for driving a session without a terminal. The render stream
//! keeps only the frame drawn since the last `clear_screen`, shared
//! between clones so a test can hand one clone to the controller and read
//! the screen back through another.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::{anyhow, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Replays a fixed list of events, then fails every read
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn from_keys(keys: Vec<KeyEvent>) -> Self {
        Self::new(keys.into_iter().map(Event::Key).collect())
    }

    /// One plain key press per character of `text`
    pub fn typing(text: &str) -> Vec<KeyEvent> {
        text.chars()
            .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    // Always ready: a script that runs dry surfaces as a read error
    // instead of an idle loop.
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(true)
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow!("No events available"))
    }
}

/// Screen-level operation recorded by [`MockRenderStream`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Flush,
}

#[derive(Debug, Default)]
struct MockScreen {
    frame: Vec<u8>,
    commands: Vec<RenderCommand>,
    frames_drawn: usize,
}

#[derive(Debug, Clone)]
pub struct MockRenderStream {
    screen: Arc<Mutex<MockScreen>>,
    size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            screen: Arc::new(Mutex::new(MockScreen::default())),
            size,
        }
    }

    fn screen(&self) -> MutexGuard<'_, MockScreen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, command: RenderCommand) {
        self.screen().commands.push(command);
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.screen().commands.clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.screen().commands.contains(command)
    }

    /// Number of `clear_screen` calls so far
    pub fn frames_drawn(&self) -> usize {
        self.screen().frames_drawn
    }

    /// Raw bytes of the current frame, escape sequences included
    pub fn raw_frame(&self) -> String {
        String::from_utf8_lossy(&self.screen().frame).into_owned()
    }

    /// Current frame with escape sequences removed. Absolute cursor moves
    /// become line breaks so each drawn row reads as its own line.
    pub fn visible_text(&self) -> String {
        strip_ansi(&self.raw_frame())
    }
}

fn strip_ansi(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        if chars.peek() != Some(&'[') {
            chars.next();
            continue;
        }
        chars.next();
        // CSI: parameters then a single final byte in '@'..='~'
        for next in chars.by_ref() {
            if ('@'..='~').contains(&next) {
                if next == 'H' && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                break;
            }
        }
    }

    out
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.screen().frame.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.frame.clear();
        screen.frames_drawn += 1;
        screen.commands.push(RenderCommand::ClearScreen);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::EnterAlternateScreen);
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::LeaveAlternateScreen);
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableRawMode);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableRawMode);
        Ok(())
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::{Print, SetForegroundColor, Color, ResetColor};
    use crossterm::{cursor::MoveTo, queue};

    #[test]
    fn event_stream_should_replay_then_fail() {
        let mut stream = MockEventStream::from_keys(MockEventStream::typing("ab"));

        assert!(stream.poll(Duration::ZERO).unwrap());
        match stream.read().unwrap() {
            Event::Key(key) => assert_eq!(key.code, KeyCode::Char('a')),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(stream.remaining(), 1);
        stream.read().unwrap();
        assert!(stream.read().is_err());
    }

    #[test]
    fn clones_should_share_the_frame() {
        let observer = MockRenderStream::new();
        let mut stream = observer.clone();

        write!(stream, "old frame").unwrap();
        stream.clear_screen().unwrap();
        write!(stream, "new frame").unwrap();

        assert_eq!(observer.visible_text(), "new frame");
        assert_eq!(observer.frames_drawn(), 1);
    }

    #[test]
    fn visible_text_should_drop_styling_and_break_on_moves() {
        let mut stream = MockRenderStream::new();
        queue!(
            stream,
            MoveTo(0, 0),
            SetForegroundColor(Color::AnsiValue(205)),
            Print("first"),
            ResetColor,
            MoveTo(0, 1),
            Print("second")
        )
        .unwrap();

        assert_eq!(stream.visible_text(), "first\nsecond");
    }

    #[test]
    fn screen_operations_should_be_recorded() {
        let mut stream = MockRenderStream::new();
        stream.enable_raw_mode().unwrap();
        stream.hide_cursor().unwrap();
        stream.disable_raw_mode().unwrap();

        assert_eq!(
            stream.commands(),
            vec![
                RenderCommand::EnableRawMode,
                RenderCommand::HideCursor,
                RenderCommand::DisableRawMode
            ]
        );
    }
}
