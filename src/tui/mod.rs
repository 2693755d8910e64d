//! # Terminal Sessions
//!
//! The interactive half of the tool, laid out MVVM-style:
//!
//! ```text
//! ┌──────────────┐  KeyEvent   ┌──────────────┐  CommandEvent  ┌──────────────┐
//! │  io streams  │────────────▶│   commands   │───────────────▶│  controller  │
//! └──────────────┘             └──────────────┘                └──────┬───────┘
//!        ▲                                                            │ applies
//!        │ frames         ┌──────────────┐      reads      ┌──────────▼───────┐
//!        └────────────────│    views     │◀────────────────│   view_models    │
//!                         └──────────────┘                 └──────────────────┘
//! ```
//!
//! Sessions are pure state machines; the controller performs every network
//! call they ask for.

pub mod commands;
pub mod controllers;
pub mod io;
pub mod models;
pub mod view_models;
pub mod views;

pub use commands::{CommandEvent, CommandRegistry};
pub use controllers::AppController;
pub use io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream};
pub use view_models::{ActiveSession, FormSession, SessionOutcome, TableSession};
