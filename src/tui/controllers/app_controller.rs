//! # Session Driver
//!
//! Owns the active session and runs it to completion. Each key event is
//! mapped through the command registry, applied to the session, and
//! followed by a fresh frame. Network calls needed by the table session
//! are awaited inline, so no further input is read until they finish.

use crate::api::{load_all_entries, EntryApi};
use crate::tui::{
    commands::{
        CommandContext, CommandEvent, CommandRegistry, FieldEdit, FocusDirection, TableMovement,
    },
    io::{EventStream, RenderStream},
    view_models::{ActiveSession, SessionOutcome},
    views::SessionRenderer,
};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct AppController<A: EntryApi, ES: EventStream, RS: RenderStream> {
    api: A,
    session: ActiveSession,
    view_renderer: SessionRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
}

impl<A: EntryApi, ES: EventStream, RS: RenderStream> AppController<A, ES, RS> {
    /// Create a driver for `session` with injected I/O streams
    pub fn new(api: A, session: ActiveSession, event_stream: ES, render_stream: RS) -> Result<Self> {
        Ok(Self {
            api,
            session,
            view_renderer: SessionRenderer::with_render_stream(render_stream)?,
            command_registry: CommandRegistry::new(),
            event_stream,
        })
    }

    pub fn session(&self) -> &ActiveSession {
        &self.session
    }

    /// Run until the session exits. The terminal is restored even when
    /// the loop fails.
    pub async fn run(&mut self) -> Result<SessionOutcome> {
        self.view_renderer.initialize()?;
        let result = self.event_loop().await;
        let cleanup = self.view_renderer.cleanup();

        let outcome = result?;
        cleanup?;
        tracing::debug!("Session finished: {:?}", outcome);
        Ok(outcome)
    }

    async fn event_loop(&mut self) -> Result<SessionOutcome> {
        self.view_renderer.render(&self.session)?;

        while !self.session.is_exited() {
            if !self.event_stream.poll(POLL_INTERVAL)? {
                continue;
            }
            match self.event_stream.read()? {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    self.handle_key(key_event).await?;
                }
                Event::Resize(width, height) => {
                    self.view_renderer.update_size(width, height);
                    self.view_renderer.render(&self.session)?;
                }
                _ => {}
            }
        }

        Ok(self.session.outcome())
    }

    async fn handle_key(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::trace!("Received key event: {:?}", key_event);
        let context = CommandContext::from_session(&self.session);

        let events = match self.command_registry.process_event(key_event, &context) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("Command failed for {:?}: {}", key_event, e);
                return Ok(());
            }
        };
        if events.is_empty() {
            return Ok(());
        }

        for event in events {
            self.apply_command_event(event).await?;
        }
        if !self.session.is_exited() {
            self.view_renderer.render(&self.session)?;
        }
        Ok(())
    }

    async fn apply_command_event(&mut self, event: CommandEvent) -> Result<()> {
        match event {
            CommandEvent::TableMoveRequested { movement } => self.move_table_cursor(movement),
            CommandEvent::DeleteRequested => self.delete_selected().await?,
            CommandEvent::RefreshRequested => {
                let started = match &mut self.session {
                    ActiveSession::Table(table) => table.begin_refresh(),
                    _ => false,
                };
                if started {
                    self.reload_table().await?;
                }
            }
            CommandEvent::FieldEditRequested { edit } => self.edit_focused_field(edit),
            CommandEvent::FocusMoveRequested { direction } => {
                if let ActiveSession::Form(form) = &mut self.session {
                    match direction {
                        FocusDirection::Next => form.focus_next(),
                        FocusDirection::Previous => form.focus_prev(),
                    };
                }
            }
            CommandEvent::ActivateRequested => {
                if let ActiveSession::Form(form) = &mut self.session {
                    form.activate();
                }
            }
            CommandEvent::CancelRequested => {
                if let ActiveSession::Form(form) = &mut self.session {
                    form.cancel();
                }
            }
            CommandEvent::QuitRequested => match &mut self.session {
                ActiveSession::Table(table) => table.quit(),
                ActiveSession::Form(form) => form.cancel(),
                ActiveSession::None => {}
            },
        }
        Ok(())
    }

    fn move_table_cursor(&mut self, movement: TableMovement) {
        let ActiveSession::Table(table) = &mut self.session else {
            return;
        };
        match movement {
            TableMovement::Up => table.move_up(1),
            TableMovement::Down => table.move_down(1),
            TableMovement::PageUp => table.page_up(),
            TableMovement::PageDown => table.page_down(),
            TableMovement::HalfPageUp => table.half_page_up(),
            TableMovement::HalfPageDown => table.half_page_down(),
            TableMovement::Top => table.goto_top(),
            TableMovement::Bottom => table.goto_bottom(),
        };
    }

    fn edit_focused_field(&mut self, edit: FieldEdit) {
        let ActiveSession::Form(form) = &mut self.session else {
            return;
        };
        form.edit(|field| match edit {
            FieldEdit::Insert(ch) => field.insert_char(ch),
            FieldEdit::Backspace => field.backspace(),
            FieldEdit::Delete => field.delete_forward(),
            FieldEdit::Left => field.move_left(),
            FieldEdit::Right => field.move_right(),
            FieldEdit::Home => {
                field.move_to_start();
                true
            }
            FieldEdit::End => {
                field.move_to_end();
                true
            }
            FieldEdit::DeleteToStart => field.delete_to_start(),
            FieldEdit::DeleteToEnd => field.delete_to_end(),
        });
    }

    /// Delete the selected row, then reload the whole collection
    async fn delete_selected(&mut self) -> Result<()> {
        let id = match &mut self.session {
            ActiveSession::Table(table) => table.begin_delete(),
            _ => None,
        };
        let Some(id) = id else {
            return Ok(());
        };
        self.view_renderer.render(&self.session)?;

        let result = self.api.delete_entry(&id).await;
        let needs_refresh = match &mut self.session {
            ActiveSession::Table(table) => table.finish_delete(result),
            _ => false,
        };
        if needs_refresh {
            self.reload_table().await?;
        }
        Ok(())
    }

    /// Full pagination sweep into the table; expects `AwaitingRefresh`
    async fn reload_table(&mut self) -> Result<()> {
        self.view_renderer.render(&self.session)?;
        let result = load_all_entries(&self.api).await;
        if let ActiveSession::Table(table) = &mut self.session {
            table.finish_refresh(result);
        }
        Ok(())
    }
}
