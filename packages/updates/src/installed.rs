// ABOUTME: Source of the locally installed database version per agency
// ABOUTME: Implemented by the local database layer; a fixed map is provided for the CLI and tests

use async_trait::async_trait;
use std::collections::HashMap;

use crate::version::DatabaseVersion;

#[async_trait]
pub trait InstalledVersions: Send + Sync {
    /// Version of the database currently installed for `agency`, if any
    async fn db_version(&self, agency: &str) -> Option<DatabaseVersion>;
}

/// Installed versions known up front
#[derive(Debug, Default, Clone)]
pub struct FixedInstalledVersions {
    versions: HashMap<String, DatabaseVersion>,
}

impl FixedInstalledVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, agency: impl Into<String>, version: impl Into<DatabaseVersion>) -> Self {
        self.versions.insert(agency.into(), version.into());
        self
    }
}

#[async_trait]
impl InstalledVersions for FixedInstalledVersions {
    async fn db_version(&self, agency: &str) -> Option<DatabaseVersion> {
        self.versions.get(agency).cloned()
    }
}
