//! # Pagination Sweep
//!
//! Walks the list endpoint page by page and assembles the full row set.

use super::{ClientError, Entry, EntryApi};
use crate::config::BATCH_SIZE;

/// Fetch every page, starting at page 0, until the server reports no next page.
///
/// Fails fast: the first page error aborts the sweep and is returned as is,
/// rows gathered before it are dropped.
pub async fn load_all_entries<A: EntryApi>(api: &A) -> Result<Vec<Entry>, ClientError> {
    let mut rows = Vec::new();
    let mut next = Some(0);

    while let Some(page) = next {
        let response = api.list_page(page).await.map_err(|e| {
            tracing::warn!("Sweep aborted at page {}: {}", page, e);
            e
        })?;
        tracing::debug!(
            "Loaded page {}/{} with {} entries",
            response.page + 1,
            response.page_count.max(1),
            response.entries.len()
        );
        next = response.next_page();
        if next.is_some() && (response.entries.len() as u64) < BATCH_SIZE {
            tracing::warn!(
                "Page {} holds {} entries, expected {}",
                page,
                response.entries.len(),
                BATCH_SIZE
            );
        }
        rows.extend(response.entries);
    }

    tracing::debug!("Sweep complete: {} entries", rows.len());
    Ok(rows)
}
