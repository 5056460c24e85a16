//! Cache setup diagnostic.
//!
//! Runs a fixed, ordered list of independent checks against a project
//! checkout and collects them into a [`Report`]:
//!
//! 1. Airtable environment variables
//! 2. The cache file and its age
//! 3. CI workflow definitions
//! 4. The fetcher script
//! 5. The manifest's fetcher script entry
//! 6. Application integration markers
//!
//! Only failure-level findings affect [`Report::passed`]. Note the last
//! check is lenient: a missing app source fails, but missing cache markers
//! inside it are only warnings.
//!
//! # Example
//!
//! ```rust,no_run
//! use racecache::config::AirtableSettings;
//! use racecache::doctor::{run_diagnostics, DoctorContext};
//!
//! let ctx = DoctorContext::new(".", AirtableSettings::from_env());
//! let report = run_diagnostics(&ctx);
//! print!("{}", report.to_text());
//! std::process::exit(report.exit_code());
//! ```

mod checks;
mod layout;
mod report;

pub use checks::{
    check_app_integration, check_cache_file, check_environment, check_fetcher_script,
    check_manifest_script, check_workflows,
};
pub use layout::ProjectLayout;
pub use report::{CheckStatus, Finding, Report, Section};

use crate::config::AirtableSettings;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::debug;

/// Everything the diagnostic reads, resolved up front.
#[derive(Debug, Clone)]
pub struct DoctorContext {
    pub layout: ProjectLayout,
    pub settings: AirtableSettings,
    /// Reference time for cache age.
    pub now: DateTime<Utc>,
}

impl DoctorContext {
    pub fn new(project_root: impl Into<PathBuf>, settings: AirtableSettings) -> Self {
        Self {
            layout: ProjectLayout::new(project_root),
            settings,
            now: Utc::now(),
        }
    }

    /// Use a fixed reference time instead of the current one.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Run every check in order and collect the report.
pub fn run_diagnostics(ctx: &DoctorContext) -> Report {
    debug!("Running diagnostics in {}", ctx.layout.root().display());

    let report = Report {
        sections: vec![
            check_environment(&ctx.settings),
            check_cache_file(&ctx.layout, ctx.now),
            check_workflows(&ctx.layout),
            check_fetcher_script(&ctx.layout),
            check_manifest_script(&ctx.layout),
            check_app_integration(&ctx.layout),
        ],
    };

    debug!(
        "Diagnostics finished: {} findings, passed={}",
        report.findings().count(),
        report.passed()
    );
    report
}
