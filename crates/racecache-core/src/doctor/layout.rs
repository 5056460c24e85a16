//! Where the diagnostic expects each artifact, relative to a project root.

use crate::config::{CacheConfig, LayoutConfig};
use std::path::{Path, PathBuf};

/// Resolved project paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_file(&self) -> PathBuf {
        CacheConfig::path_in(&self.root)
    }

    pub fn workflows_dir(&self) -> PathBuf {
        self.root.join(LayoutConfig::WORKFLOWS_DIR)
    }

    /// Each expected workflow file name with its full path.
    pub fn workflow_files(&self) -> Vec<(&'static str, PathBuf)> {
        let dir = self.workflows_dir();
        LayoutConfig::WORKFLOW_FILES
            .iter()
            .map(|name| (*name, dir.join(name)))
            .collect()
    }

    /// Path of the fetcher script, relative to the root.
    pub fn fetcher_script_display(&self) -> String {
        format!("{}/{}", LayoutConfig::SCRIPTS_DIR, LayoutConfig::FETCHER_SCRIPT)
    }

    pub fn fetcher_script(&self) -> PathBuf {
        self.root
            .join(LayoutConfig::SCRIPTS_DIR)
            .join(LayoutConfig::FETCHER_SCRIPT)
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join(LayoutConfig::MANIFEST_FILENAME)
    }

    pub fn app_source(&self) -> PathBuf {
        self.root.join(LayoutConfig::APP_SOURCE)
    }
}
