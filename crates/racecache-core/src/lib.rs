//! Race cache - build-time Airtable cache tooling for the race site.
//!
//! Two independent operations live here, both without any HTTP/CLI layer:
//!
//! - [`fetch`]: pull the race table from Airtable once and overwrite
//!   `public/data.json` with a timestamped envelope.
//! - [`doctor`]: inspect a project checkout (environment, cache file, CI
//!   workflows, scripts, app source) and produce a pass/fail report.
//!
//! Configuration is read once by the caller and passed in as
//! [`config::AirtableSettings`].
//!
//! # Example
//!
//! ```rust,no_run
//! use racecache::config::{AirtableSettings, CacheConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> racecache::Result<()> {
//!     let settings = AirtableSettings::from_env();
//!     let output = CacheConfig::path_in(std::path::Path::new("."));
//!     let summary = racecache::fetch::fetch_to_cache(&settings, &output).await?;
//!     println!("Cached {} records", summary.record_count);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod doctor;
pub mod error;
pub mod fetch;
pub mod network;

pub use cache::{CacheEnvelope, CacheSnapshot};
pub use config::{AirtableCredentials, AirtableSettings};
pub use doctor::{run_diagnostics, DoctorContext, Report};
pub use error::{RaceCacheError, Result};
pub use fetch::{fetch_to_cache, refresh_cache, FetchSummary};
