//! Network access: a small HTTP client and the Airtable record source.

mod airtable;
mod client;

pub use airtable::{parse_records, table_url, AirtableClient, RecordSource};
pub use client::{HttpClient, TextResponse};
