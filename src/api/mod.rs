//! # Remote Mailbox API
//!
//! Typed access to the contact form server: the wire types, the
//! [`EntryApi`] seam the terminal sessions are written against, the
//! reqwest-backed [`ApiClient`], and the pagination sweep.

pub mod client;
pub mod error;
pub mod pagination;

pub use client::ApiClient;
pub use error::ClientError;
pub use pagination::load_all_entries;

use serde::{Deserialize, Serialize};

/// A stored contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub message: String,
}

/// A submission that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub from: String,
    pub subject: String,
    pub message: String,
}

impl NewEntry {
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// One page of the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryPage {
    pub page: i64,
    pub page_count: i64,
    pub entry_count: i64,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl EntryPage {
    /// Index of the following page, or `None` when this is the last one
    pub fn next_page(&self) -> Option<u64> {
        if self.page < self.page_count - 1 {
            u64::try_from(self.page + 1).ok()
        } else {
            None
        }
    }
}

/// Error body returned by the server on any non-200 response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: String,
}

/// Operations the terminal sessions need from the server.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait EntryApi {
    /// Fetch one page of submissions
    async fn list_page(&self, page: u64) -> Result<EntryPage, ClientError>;

    /// Fetch a single submission as the raw JSON the server returned
    async fn get_entry(&self, id: &str) -> Result<String, ClientError>;

    /// Delete a submission by id
    async fn delete_entry(&self, id: &str) -> Result<(), ClientError>;

    /// Store a new submission
    async fn create_entry(&self, entry: &NewEntry) -> Result<(), ClientError>;
}
