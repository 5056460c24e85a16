//! The individual setup checks.
//!
//! Each check is independent and returns its own [`Section`]; none of them
//! looks at another's outcome.

use crate::cache::{read_json, CacheSnapshot, Freshness};
use crate::config::{AirtableSettings, EnvVars, LayoutConfig};
use crate::doctor::layout::ProjectLayout;
use crate::doctor::report::{Finding, Section};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

const MASKED_KEY_CHARS: usize = 8;

/// Show only the first few characters of a secret.
fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(MASKED_KEY_CHARS).collect();
    format!("{}...", prefix)
}

/// Both required variables must be set; the table name has a default.
pub fn check_environment(settings: &AirtableSettings) -> Section {
    let section = Section::new("Checking environment variables");
    let missing = settings.missing_variables();

    if !missing.is_empty() {
        let finding = missing.iter().fold(
            Finding::fail("Missing environment variables"),
            |finding, name| finding.detail(format!("{} is not set", name)),
        );
        return section.with(finding.hint("Create a .env file with these variables"));
    }

    let api_key = settings.api_key.as_deref().unwrap_or_default();
    let base_id = settings.base_id.as_deref().unwrap_or_default();
    section.with(
        Finding::pass("Environment variables are set")
            .detail(format!("{}: {}", EnvVars::API_KEY, mask_secret(api_key)))
            .detail(format!("{}: {}", EnvVars::BASE_ID, base_id))
            .detail(format!("{}: {}", EnvVars::TABLE_NAME, settings.table_name)),
    )
}

/// The cache file must exist; a stale cache is only a warning.
pub fn check_cache_file(layout: &ProjectLayout, now: DateTime<Utc>) -> Section {
    let mut section = Section::new("Checking cache file");
    let path = layout.cache_file();

    let snapshot = match CacheSnapshot::read(&path) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            return section.with(
                Finding::not_found("Cache file does not exist yet").hint(format!(
                    "Run: npm run {}",
                    LayoutConfig::FETCHER_SCRIPT_KEY
                )),
            );
        }
        Err(e) => {
            return section.with(Finding::fail(format!("Cache file could not be read: {}", e)));
        }
    };

    section.push(
        Finding::pass("Cache file exists")
            .detail(format!("Path: {}", snapshot.path.display()))
            .detail(format!("Size: {:.2} KB", snapshot.size_kb()))
            .detail(format!("Records: {}", snapshot.record_count))
            .detail(format!(
                "Last updated: {}",
                snapshot.cached_at.as_deref().unwrap_or("Unknown")
            )),
    );

    match snapshot.freshness(now) {
        Some(Freshness::Fresh { minutes }) => {
            section.push(Finding::pass(format!("Cache is fresh ({} minutes old)", minutes)));
        }
        Some(Freshness::Stale { minutes }) => {
            section.push(Finding::warn(format!(
                "Cache is {} minutes old (consider refreshing)",
                minutes
            )));
        }
        Some(Freshness::Unknown) => {
            section.push(Finding::warn("Cache timestamp could not be parsed"));
        }
        None => debug!("Cache has no cached_at; skipping age check"),
    }

    section
}

/// Both CI workflow definitions must exist.
pub fn check_workflows(layout: &ProjectLayout) -> Section {
    let mut section = Section::new("Checking GitHub workflows");

    if !layout.workflows_dir().is_dir() {
        return section.with(Finding::fail(format!(
            "{} directory not found",
            LayoutConfig::WORKFLOWS_DIR
        )));
    }

    for (name, path) in layout.workflow_files() {
        if path.is_file() {
            section.push(Finding::pass(format!("{} exists", name)));
        } else {
            section.push(Finding::fail(format!("{} not found", name)));
        }
    }

    section
}

/// The fetcher script must exist.
pub fn check_fetcher_script(layout: &ProjectLayout) -> Section {
    let section = Section::new("Checking scripts");
    let display = layout.fetcher_script_display();

    if layout.fetcher_script().is_file() {
        section.with(Finding::pass(format!("{} exists", display)))
    } else {
        section.with(Finding::fail(format!("{} not found", display)))
    }
}

/// The project manifest must declare the fetcher script entry.
pub fn check_manifest_script(layout: &ProjectLayout) -> Section {
    let section = Section::new("Checking npm scripts");
    let key = LayoutConfig::FETCHER_SCRIPT_KEY;
    let manifest_name = LayoutConfig::MANIFEST_FILENAME;

    let manifest = match read_json::<Value>(&layout.manifest()) {
        Ok(Some(manifest)) => manifest,
        Ok(None) => return section.with(Finding::fail(format!("{} not found", manifest_name))),
        Err(e) => {
            return section.with(Finding::fail(format!(
                "{} could not be read: {}",
                manifest_name, e
            )));
        }
    };

    let declared = manifest
        .get("scripts")
        .and_then(|scripts| scripts.get(key))
        .and_then(Value::as_str)
        .map(|command| !command.trim().is_empty())
        .unwrap_or(false);

    if declared {
        section.with(Finding::pass(format!("npm script \"{}\" is configured", key)))
    } else {
        section.with(Finding::fail(format!(
            "npm script \"{}\" not found in {}",
            key, manifest_name
        )))
    }
}

/// The app source must exist. Missing cache markers are warnings only and
/// do not fail the run.
pub fn check_app_integration(layout: &ProjectLayout) -> Section {
    let mut section = Section::new("Checking application integration");
    let source_path = layout.app_source();

    // Only substrings are searched, so invalid UTF-8 is tolerated.
    let content = match std::fs::read(&source_path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return section.with(Finding::fail(format!("{} not found", LayoutConfig::APP_SOURCE)));
        }
        Err(e) => {
            return section.with(Finding::fail(format!(
                "{} could not be read: {}",
                LayoutConfig::APP_SOURCE,
                e
            )));
        }
    };

    if content.contains(LayoutConfig::CACHE_FETCH_FN) {
        section.push(Finding::pass("Cache-first logic is implemented"));
    } else {
        section.push(
            Finding::warn("Cache logic might not be implemented").detail(format!(
                "Check if {} function exists",
                LayoutConfig::CACHE_FETCH_FN
            )),
        );
    }

    if content.contains(LayoutConfig::CACHE_URL_PATH) {
        section.push(Finding::pass(format!(
            "Application fetches from {}",
            LayoutConfig::CACHE_URL_PATH
        )));
    } else {
        section.push(Finding::warn("Application might not be fetching from cache"));
    }

    section
}
