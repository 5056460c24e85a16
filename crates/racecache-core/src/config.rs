//! Centralized configuration for the race cache tools.
//!
//! Constants live on unit structs, grouped by concern. The only runtime
//! configuration is [`AirtableSettings`], which is read once at startup and
//! passed into everything that needs it.

use crate::{RaceCacheError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable names.
pub struct EnvVars;

impl EnvVars {
    pub const API_KEY: &'static str = "AIRTABLE_API_KEY";
    pub const BASE_ID: &'static str = "AIRTABLE_BASE_ID";
    pub const TABLE_NAME: &'static str = "AIRTABLE_TABLE_NAME";
    pub const API_URL: &'static str = "AIRTABLE_API_URL";
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const AIRTABLE_API_BASE: &'static str = "https://api.airtable.com/v0";
    pub const DEFAULT_TABLE_NAME: &'static str = "Races";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const USER_AGENT: &'static str = concat!("racecache/", env!("CARGO_PKG_VERSION"));
}

/// Cache file configuration.
pub struct CacheConfig;

impl CacheConfig {
    pub const PUBLIC_DIR_NAME: &'static str = "public";
    pub const CACHE_FILENAME: &'static str = "data.json";
    /// Caches older than this many whole minutes are reported as stale.
    pub const STALE_AFTER_MINUTES: i64 = 15;

    /// Location of the cache file under a project root.
    pub fn path_in(project_root: &Path) -> PathBuf {
        project_root
            .join(Self::PUBLIC_DIR_NAME)
            .join(Self::CACHE_FILENAME)
    }
}

/// Paths and markers inspected by the setup diagnostic, relative to the
/// project root.
pub struct LayoutConfig;

impl LayoutConfig {
    pub const WORKFLOWS_DIR: &'static str = ".github/workflows";
    pub const WORKFLOW_FILES: [&'static str; 2] = ["update-cache.yml", "update-cache-frequent.yml"];
    pub const SCRIPTS_DIR: &'static str = "scripts";
    pub const FETCHER_SCRIPT: &'static str = "fetch-airtable.js";
    pub const MANIFEST_FILENAME: &'static str = "package.json";
    pub const FETCHER_SCRIPT_KEY: &'static str = "fetch-airtable";
    pub const APP_SOURCE: &'static str = "src/app/airtable.cljs";
    pub const CACHE_FETCH_FN: &'static str = "fetch-races-from-cache";
    pub const CACHE_URL_PATH: &'static str = "/data.json";
    pub const TROUBLESHOOTING_DOC: &'static str = "CACHE_WORKFLOW_TROUBLESHOOTING.md";
}

/// Airtable connection settings.
///
/// Required values stay optional here so the diagnostic can report on them;
/// the fetcher goes through [`AirtableSettings::credentials`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtableSettings {
    pub api_key: Option<String>,
    pub base_id: Option<String>,
    pub table_name: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
}

/// The two required values, known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtableCredentials {
    pub api_key: String,
    pub base_id: String,
}

impl AirtableSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset; anything else is kept verbatim.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            api_key: get(EnvVars::API_KEY),
            base_id: get(EnvVars::BASE_ID),
            table_name: get(EnvVars::TABLE_NAME)
                .unwrap_or_else(|| NetworkConfig::DEFAULT_TABLE_NAME.to_string()),
            api_base_url: get(EnvVars::API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| NetworkConfig::AIRTABLE_API_BASE.to_string()),
            request_timeout: NetworkConfig::REQUEST_TIMEOUT,
        }
    }

    /// Names of required variables that are missing, in a fixed order.
    pub fn missing_variables(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push(EnvVars::API_KEY);
        }
        if self.base_id.is_none() {
            missing.push(EnvVars::BASE_ID);
        }
        missing
    }

    /// Return the required values, or a `Config` error naming what is absent.
    pub fn credentials(&self) -> Result<AirtableCredentials> {
        match (&self.api_key, &self.base_id) {
            (Some(api_key), Some(base_id)) => Ok(AirtableCredentials {
                api_key: api_key.clone(),
                base_id: base_id.clone(),
            }),
            _ => Err(RaceCacheError::Config {
                missing: self
                    .missing_variables()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }),
        }
    }
}

impl Default for AirtableSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> AirtableSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AirtableSettings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = AirtableSettings::default();
        assert_eq!(settings.table_name, "Races");
        assert_eq!(settings.api_base_url, "https://api.airtable.com/v0");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(
            settings.missing_variables(),
            vec!["AIRTABLE_API_KEY", "AIRTABLE_BASE_ID"]
        );
    }

    #[test]
    fn test_credentials_present() {
        let settings = settings_from(&[
            ("AIRTABLE_API_KEY", "keyABC"),
            ("AIRTABLE_BASE_ID", "appXYZ"),
            ("AIRTABLE_TABLE_NAME", "Race Results"),
        ]);
        let creds = settings.credentials().unwrap();
        assert_eq!(creds.api_key, "keyABC");
        assert_eq!(creds.base_id, "appXYZ");
        assert_eq!(settings.table_name, "Race Results");
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let settings = settings_from(&[("AIRTABLE_API_KEY", ""), ("AIRTABLE_BASE_ID", "appXYZ")]);
        match settings.credentials() {
            Err(RaceCacheError::Config { missing }) => {
                assert_eq!(missing, vec!["AIRTABLE_API_KEY".to_string()]);
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_values_are_kept_verbatim() {
        let settings = settings_from(&[
            ("AIRTABLE_API_KEY", " k "),
            ("AIRTABLE_BASE_ID", "   "),
            ("AIRTABLE_TABLE_NAME", "Races "),
        ]);
        let creds = settings.credentials().unwrap();
        assert_eq!(creds.api_key, " k ");
        assert_eq!(creds.base_id, "   ");
        assert_eq!(settings.table_name, "Races ");
    }

    #[test]
    fn test_api_url_override_drops_trailing_slash() {
        let settings = settings_from(&[("AIRTABLE_API_URL", "http://127.0.0.1:9000/v0/")]);
        assert_eq!(settings.api_base_url, "http://127.0.0.1:9000/v0");
    }
}
