// ABOUTME: Per-agency database update checker
// ABOUTME: Rate-limits remote checks and caches the last seen version in the key-value store

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use waypoint_config::constants::{
    DEFAULT_UPDATE_CHECK_INTERVAL_SECS, WAYPOINT_UPDATE_CHECK_INTERVAL_SECS,
};
use waypoint_config::parse_env_or_default;
use waypoint_storage::KeyValueStore;

use crate::api::ApiClient;
use crate::clock::{Clock, SystemClock};
use crate::error::UpdateResult;
use crate::installed::InstalledVersions;
use crate::version::{DatabaseVersion, UpdateInfo};

/// Update checker settings
#[derive(Debug, Clone)]
pub struct UpdateCheckerConfig {
    /// Minimum time between two remote checks of the same agency
    pub check_interval: Duration,
}

impl Default for UpdateCheckerConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(DEFAULT_UPDATE_CHECK_INTERVAL_SECS),
        }
    }
}

impl UpdateCheckerConfig {
    pub fn from_env() -> Self {
        Self {
            check_interval: Duration::from_secs(parse_env_or_default(
                WAYPOINT_UPDATE_CHECK_INTERVAL_SECS,
                DEFAULT_UPDATE_CHECK_INTERVAL_SECS,
            )),
        }
    }
}

fn latest_version_key(agency: &str) -> String {
    format!("db-version-latest-{}", agency)
}

fn last_checked_key(agency: &str) -> String {
    format!("db-version-latest-checked-{}", agency)
}

/// Decides when to ask the API about newer agency databases.
///
/// Per agency the store holds the time of the last remote check and the
/// latest version seen. Nothing is locked: concurrent checks for one agency
/// may both hit the API and the last write wins.
#[derive(Clone)]
pub struct UpdateChecker {
    store: Arc<dyn KeyValueStore>,
    api: Arc<dyn ApiClient>,
    installed: Arc<dyn InstalledVersions>,
    clock: Arc<dyn Clock>,
    config: UpdateCheckerConfig,
}

impl UpdateChecker {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn ApiClient>,
        installed: Arc<dyn InstalledVersions>,
    ) -> Self {
        Self {
            store,
            api,
            installed,
            clock: Arc::new(SystemClock),
            config: UpdateCheckerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: UpdateCheckerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Check for a newer database for `agency`.
    ///
    /// Within the check interval (and unless `force` is set) this only
    /// consults the cached state, see [`UpdateChecker::is_update_available`].
    /// Otherwise the API is queried and the result cached. A fresh answer
    /// reports an update only when an installed version exists and the
    /// remote one is newer.
    ///
    /// API failures are returned only for forced checks. An unforced check
    /// that cannot reach the API falls back to the cached answer. In both
    /// cases the stored state is left untouched.
    pub async fn check(&self, agency: &str, force: bool) -> UpdateResult<Option<UpdateInfo>> {
        let last_checked = self.last_checked_at(agency).await;
        let now = self.clock.now_millis();
        let interval_ms = i64::try_from(self.config.check_interval.as_millis()).unwrap_or(i64::MAX);

        if now.saturating_sub(last_checked) <= interval_ms && !force {
            debug!("Update check for {} within interval, using cached state", agency);
            return Ok(self.is_update_available(agency).await);
        }

        info!("Checking for {} database update (forced: {})", agency, force);
        let update = match self.api.get_database_update(agency).await {
            Ok(update) => update,
            Err(e) if force => return Err(e.into()),
            Err(e) => {
                if e.is_network_error() {
                    info!("Update API unreachable for {}, using cached state: {}", agency, e);
                } else {
                    warn!("Update check for {} failed, using cached state: {}", agency, e);
                }
                return Ok(self.is_update_available(agency).await);
            }
        };

        let latest = update.version;
        self.save_last_checked_at(agency, now).await;
        self.save_latest_known_version(agency, &latest).await;

        match self.installed.db_version(agency).await {
            Some(installed) if latest > installed => {
                info!("{} database update available: {}", agency, latest);
                Ok(Some(UpdateInfo::available(Some(latest))))
            }
            Some(installed) => {
                debug!("{} database {} is current", agency, installed);
                Ok(None)
            }
            None => {
                debug!("No {} database installed, nothing to compare", agency);
                Ok(None)
            }
        }
    }

    /// Compare the installed version with the cached latest version.
    ///
    /// Never touches the network. Reports an update when either version is
    /// unknown or the cached one is newer.
    pub async fn is_update_available(&self, agency: &str) -> Option<UpdateInfo> {
        let installed = self.installed.db_version(agency).await;
        let latest = self.latest_known_version(agency).await;

        match (installed, latest) {
            (Some(installed), Some(latest)) if latest <= installed => None,
            (_, latest) => Some(UpdateInfo::available(latest)),
        }
    }

    /// Forget the cached version and check time, e.g. when an agency is removed
    pub async fn clear_db_version_latest(&self, agency: &str) {
        for key in [latest_version_key(agency), last_checked_key(agency)] {
            if let Err(e) = self.store.del(&key).await {
                warn!("Failed to delete {}: {}", key, e);
            }
        }
    }

    /// Epoch milliseconds of the last successful remote check, 0 if never
    pub async fn last_checked_at(&self, agency: &str) -> i64 {
        match self.store.get(&last_checked_key(agency)).await {
            Ok(Some(value)) => value.as_i64().unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                warn!("Failed to read last check time for {}: {}", agency, e);
                0
            }
        }
    }

    /// Latest version reported by the API, as cached locally
    pub async fn latest_known_version(&self, agency: &str) -> Option<DatabaseVersion> {
        match self.store.get(&latest_version_key(agency)).await {
            Ok(Some(value)) => serde_json::from_value(value).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read latest version for {}: {}", agency, e);
                None
            }
        }
    }

    async fn save_last_checked_at(&self, agency: &str, now: i64) {
        if let Err(e) = self.store.put(&last_checked_key(agency), &Value::from(now)).await {
            warn!("Failed to save last check time for {}: {}", agency, e);
        }
    }

    async fn save_latest_known_version(&self, agency: &str, version: &DatabaseVersion) {
        let value = match serde_json::to_value(version) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to encode version {} for {}: {}", version, agency, e);
                return;
            }
        };

        if let Err(e) = self.store.put(&latest_version_key(agency), &value).await {
            warn!("Failed to save latest version for {}: {}", agency, e);
        }
    }
}
