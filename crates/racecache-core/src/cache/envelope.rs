//! The cache envelope written by the fetcher and read back by the diagnostic.

use crate::cache::atomic::read_json;
use crate::config::CacheConfig;
use crate::{RaceCacheError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// JSON object written to `public/data.json`.
///
/// Records are passed through exactly as the upstream API returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub cached_at: String,
    pub records: Vec<Value>,
}

impl CacheEnvelope {
    /// Wrap records with the current time.
    pub fn new(records: Vec<Value>) -> Self {
        Self::at(Utc::now(), records)
    }

    /// Wrap records with an explicit creation time.
    pub fn at(cached_at: DateTime<Utc>, records: Vec<Value>) -> Self {
        Self {
            cached_at: format_timestamp(cached_at),
            records,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a `cached_at` value back into UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// How old a cache is relative to some reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh { minutes: i64 },
    Stale { minutes: i64 },
    /// `cached_at` was present but not a timestamp.
    Unknown,
}

/// Lenient view of a cache file on disk.
///
/// Unlike [`CacheEnvelope`], no field is required: a file without `records`
/// reports zero records and a file without `cached_at` has no age.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub record_count: usize,
    pub cached_at: Option<String>,
}

impl CacheSnapshot {
    /// Read a snapshot of the cache at `path`.
    ///
    /// Returns `None` if the file doesn't exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let Some(data) = read_json::<Value>(path)? else {
            return Ok(None);
        };

        let size_bytes = std::fs::metadata(path)
            .map_err(|e| RaceCacheError::io_with_path(e, path))?
            .len();

        let record_count = data
            .get("records")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);

        let cached_at = match data.get("cached_at") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Ok(Some(Self {
            path: path.to_path_buf(),
            size_bytes,
            record_count,
            cached_at,
        }))
    }

    /// File size in kilobytes, as shown in the report.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    /// Whole minutes elapsed between `cached_at` and `now`, rounded down.
    pub fn age_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        let cached_at = parse_timestamp(self.cached_at.as_deref()?)?;
        let millis = now.signed_duration_since(cached_at).num_milliseconds();
        Some(millis.div_euclid(60_000))
    }

    /// Classify the cache age, or `None` when there is no `cached_at`.
    pub fn freshness(&self, now: DateTime<Utc>) -> Option<Freshness> {
        self.cached_at.as_ref()?;
        Some(match self.age_minutes(now) {
            Some(minutes) if minutes > CacheConfig::STALE_AFTER_MINUTES => {
                Freshness::Stale { minutes }
            }
            Some(minutes) => Freshness::Fresh { minutes },
            None => Freshness::Unknown,
        })
    }
}
