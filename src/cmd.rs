//! # Subcommand runners
//!
//! Glue between parsed arguments, the API client and the terminal
//! sessions. Every runner reports its own failures and returns the exit
//! status; nothing here panics or exits the process directly.

use crate::api::{error::status_line, load_all_entries, ApiClient, ClientError, EntryApi, NewEntry};
use crate::cmd_args::{Action, CommandLineArgs};
use crate::config::{ApiConfig, TABLE_HEIGHT};
use crate::tui::{
    ActiveSession, AppController, FormSession, SessionOutcome, TableSession, TerminalEventStream,
    TerminalRenderStream,
};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::process::ExitCode;

/// Exit status of a subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => ExitCode::SUCCESS,
            Exit::Failure => ExitCode::FAILURE,
        }
    }
}

pub fn version_string() -> String {
    format!("Mailbox: v{}", env!("CARGO_PKG_VERSION"))
}

/// Dispatch a parsed command line
pub async fn run(args: &CommandLineArgs) -> Exit {
    if args.action() == &Action::Version {
        println!("{}", version_string());
        return Exit::Success;
    }

    let config = match ApiConfig::from_args(args.api(), args.usr(), args.pwd()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return Exit::Failure;
        }
    };
    tracing::debug!("Using API endpoint {}", config.base_url());
    let client = ApiClient::new(config);

    let result = match args.action() {
        Action::Browse => browse(&client).await,
        Action::New {
            from,
            subject,
            message,
        } => new_entry(&client, from.as_deref(), subject.as_deref(), message.as_deref()).await,
        Action::Get { id } => Ok(print_entry(&client, id).await),
        Action::Version => Ok(Exit::Success),
    };

    result.unwrap_or_else(|e| {
        tracing::error!("{:#}", e);
        eprintln!("Error: {e:#}");
        Exit::Failure
    })
}

/// Print a client error the way the server reported it
pub fn report(err: &ClientError) {
    match err {
        ClientError::Server { status, message } => {
            eprintln!("Server error: {}", status_line(*status));
            if !message.is_empty() && *message != status_line(*status) {
                eprintln!("{message}");
            }
        }
        _ => eprintln!("Error: {err}"),
    }
}

/// Initial sweep, then the table session. An empty collection is a failure.
pub async fn browse(client: &ApiClient) -> Result<Exit> {
    let rows = match load_all_entries(client).await {
        Ok(rows) => rows,
        Err(e) => {
            report(&e);
            return Ok(Exit::Failure);
        }
    };
    if rows.is_empty() {
        println!("No submissions found");
        return Ok(Exit::Failure);
    }

    let session = ActiveSession::Table(TableSession::new(rows, TABLE_HEIGHT));
    run_terminal_session(client, session).await?;
    Ok(Exit::Success)
}

/// Submit directly when every field is given, otherwise open the form
pub async fn new_entry(
    client: &ApiClient,
    from: Option<&str>,
    subject: Option<&str>,
    message: Option<&str>,
) -> Result<Exit> {
    fn filled(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.is_empty())
    }
    if let (Some(from), Some(subject), Some(message)) =
        (filled(from), filled(subject), filled(message))
    {
        tracing::debug!("All fields given, skipping the form");
        return Ok(submit_entry(client, &NewEntry::new(from, subject, message)).await);
    }

    let session = ActiveSession::Form(FormSession::with_values(from, subject, message));
    match run_terminal_session(client, session).await? {
        SessionOutcome::Submitted(entry) => Ok(submit_entry(client, &entry).await),
        _ => Ok(Exit::Success),
    }
}

/// One create call, no retry
pub async fn submit_entry<A: EntryApi>(api: &A, entry: &NewEntry) -> Exit {
    match api.create_entry(entry).await {
        Ok(()) => {
            println!("Response Status: {}", status_line(StatusCode::OK));
            println!("(success)");
            Exit::Success
        }
        Err(e) => {
            report(&e);
            Exit::Failure
        }
    }
}

/// Print one record's raw JSON
pub async fn print_entry<A: EntryApi>(api: &A, id: &str) -> Exit {
    match api.get_entry(id).await {
        Ok(body) => {
            println!("{}", body.trim_end());
            Exit::Success
        }
        Err(e) => {
            report(&e);
            Exit::Failure
        }
    }
}

async fn run_terminal_session(client: &ApiClient, session: ActiveSession) -> Result<SessionOutcome> {
    let mut controller = AppController::new(
        client.clone(),
        session,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )
    .context("could not start terminal session")?;
    controller.run().await.context("terminal session failed")
}
