//! Fetch records and write the cache envelope.

use crate::cache::{write_json_atomic, CacheEnvelope};
use crate::config::AirtableSettings;
use crate::network::{AirtableClient, RecordSource};
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    pub record_count: usize,
    pub cached_at: String,
    pub path: PathBuf,
}

/// Fetch from Airtable and overwrite the cache at `output`.
///
/// Missing credentials fail before any request is made.
pub async fn fetch_to_cache(settings: &AirtableSettings, output: &Path) -> Result<FetchSummary> {
    let client = AirtableClient::new(settings)?;
    refresh_cache(&client, output).await
}

/// Pull records from `source` and overwrite the cache at `output`.
///
/// The destination is only written once the records are in hand, so any
/// fetch or parse failure leaves an existing cache untouched.
pub async fn refresh_cache(source: &dyn RecordSource, output: &Path) -> Result<FetchSummary> {
    let records = source.fetch_records().await?;
    let envelope = CacheEnvelope::new(records);

    write_json_atomic(output, &envelope)?;
    info!(
        "Cached {} records from {} to {}",
        envelope.record_count(),
        source.describe(),
        output.display()
    );

    Ok(FetchSummary {
        record_count: envelope.record_count(),
        cached_at: envelope.cached_at,
        path: output.to_path_buf(),
    })
}
