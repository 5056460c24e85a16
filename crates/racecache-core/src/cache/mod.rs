//! Cache file format and persistence.

mod atomic;
mod envelope;

pub use atomic::{read_json, write_json_atomic};
pub use envelope::{
    format_timestamp, parse_timestamp, CacheEnvelope, CacheSnapshot, Freshness,
};
