//! # Mailbox - terminal client for contact form submissions
//!
//! Browse, create and delete the records behind a Mailbox API server.
//!
//! ```text
//! cmd_args ──▶ cmd ──▶ tui::AppController ──▶ TableSession / FormSession
//!               │              │
//!               └──────────────┴──▶ api::ApiClient ──▶ HTTP
//! ```
//!
//! - [`api`]: the HTTP client, its errors and the pagination sweep
//! - [`tui`]: terminal sessions, key bindings and rendering
//! - [`cmd`]: subcommand runners and exit codes

pub mod api;
pub mod cmd;
pub mod cmd_args;
pub mod config;
pub mod logging;
pub mod tui;

pub use api::{ApiClient, ClientError, Entry, EntryApi, NewEntry};
pub use config::ApiConfig;
pub use tui::{ActiveSession, AppController, SessionOutcome};
