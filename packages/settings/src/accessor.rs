// ABOUTME: Read/write access to the persisted settings document
// ABOUTME: Reads merge saved overrides over defaults, writes persist the merged document

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use waypoint_config::{default_settings, SETTINGS_KEY};
use waypoint_storage::KeyValueStore;

use crate::document::{assign, deep_merge, resolve};
use crate::error::SettingsResult;
use crate::path::SettingsPath;

/// Settings facade over a key-value store.
///
/// There is no locking around `set_value`: two concurrent writers each persist
/// their own merged copy and the last write wins.
#[derive(Clone)]
pub struct SettingsAccessor {
    store: Arc<dyn KeyValueStore>,
    defaults: Value,
}

impl SettingsAccessor {
    /// Accessor backed by the compiled-in default document
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_defaults(store, default_settings())
    }

    pub fn with_defaults(store: Arc<dyn KeyValueStore>, defaults: Value) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &Value {
        &self.defaults
    }

    /// Get the full settings document.
    ///
    /// Falls back to the defaults when nothing usable is stored or the store
    /// cannot be read.
    pub async fn get_all(&self) -> Value {
        match self.store.get(SETTINGS_KEY).await {
            Ok(Some(saved)) if saved.is_object() => deep_merge(&self.defaults, &saved),
            Ok(Some(_)) => {
                warn!("Stored settings are not an object, using defaults");
                self.defaults.clone()
            }
            Ok(None) => {
                debug!("No saved settings, using defaults");
                self.defaults.clone()
            }
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                self.defaults.clone()
            }
        }
    }

    /// Get the value at a dot-separated path such as `"display.theme"`.
    ///
    /// Returns `None` for unparseable paths and for missing segments.
    pub async fn get_value(&self, path: &str) -> Option<Value> {
        let path = path.parse::<SettingsPath>().ok()?;
        self.get_value_at(&path).await
    }

    pub async fn get_value_at(&self, path: &SettingsPath) -> Option<Value> {
        let settings = self.get_all().await;
        resolve(&settings, path).cloned()
    }

    /// Typed variant of `get_value`; values of the wrong shape read as `None`
    pub async fn get_value_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let value = self.get_value(path).await?;
        serde_json::from_value(value).ok()
    }

    /// Set the value at a dot-separated path and persist the whole document
    pub async fn set_value(&self, path: &str, value: Value) -> SettingsResult<()> {
        let path = path.parse::<SettingsPath>()?;
        self.set_value_at(&path, value).await
    }

    /// Set the value at `path` and persist the whole merged document.
    ///
    /// Defaults present at write time are saved along with the change.
    pub async fn set_value_at(&self, path: &SettingsPath, value: Value) -> SettingsResult<()> {
        let mut settings = self.get_all().await;
        assign(&mut settings, path, value);

        self.store.put(SETTINGS_KEY, &settings).await?;
        debug!("Saved setting {}", path);
        Ok(())
    }
}
