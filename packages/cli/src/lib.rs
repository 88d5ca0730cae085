// ABOUTME: Shared helpers for the waypoint binary
// ABOUTME: Store opening, update checker wiring, value parsing and timestamp formatting

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use waypoint_storage::{KeyValueStore, SqliteStore, SqliteStoreConfig, StorageResult};
use waypoint_updates::{
    ApiClient, ApiError, ApiResult, DatabaseUpdate, DatabaseVersion, FixedInstalledVersions,
    UpdateChecker,
};

/// Open the SQLite store at `path`
pub async fn open_store(path: &Path) -> StorageResult<Arc<dyn KeyValueStore>> {
    let store = SqliteStore::new(SqliteStoreConfig::new(path)).await?;
    Ok(Arc::new(store))
}

/// API stand-in for commands that only touch cached update state
struct OfflineApi;

#[async_trait]
impl ApiClient for OfflineApi {
    async fn get_database_update(&self, _agency: &str) -> ApiResult<DatabaseUpdate> {
        Err(ApiError::config("API access is not available for this command"))
    }
}

/// Installed versions as given on the command line
pub fn installed_versions(
    agency: &str,
    installed: Option<DatabaseVersion>,
) -> FixedInstalledVersions {
    match installed {
        Some(version) => FixedInstalledVersions::new().with(agency, version),
        None => FixedInstalledVersions::new(),
    }
}

/// Checker for `status` and `clear`, which never need the API configuration
pub fn offline_checker(
    store: Arc<dyn KeyValueStore>,
    agency: &str,
    installed: Option<DatabaseVersion>,
) -> UpdateChecker {
    UpdateChecker::new(
        store,
        Arc::new(OfflineApi),
        Arc::new(installed_versions(agency, installed)),
    )
}

/// Interpret a command line value as JSON, falling back to a plain string.
///
/// `5` becomes a number and `true` a boolean, while `dark` is kept as text.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Render an epoch-millisecond timestamp, `never` for 0
pub fn format_timestamp(millis: i64) -> String {
    if millis <= 0 {
        return "never".to_string();
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use waypoint_storage::MemoryStore;
    use waypoint_updates::UpdateInfo;

    #[rstest]
    #[case("5", json!(5))]
    #[case("true", json!(true))]
    #[case("null", json!(null))]
    #[case("[\"JAM\",\"WDD\"]", json!(["JAM", "WDD"]))]
    #[case("{\"accent\":\"blue\"}", json!({"accent": "blue"}))]
    #[case("dark", json!("dark"))]
    #[case("\"12\"", json!("12"))]
    fn test_parse_value(#[case] raw: &str, #[case] expected: Value) {
        assert_eq!(parse_value(raw), expected);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "never");
        assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13:20 UTC");
    }

    #[tokio::test]
    async fn test_open_store_creates_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("data").join("waypoint.db");

        let store = open_store(&db_path).await.unwrap();
        store.put("settings", &json!({})).await.unwrap();

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_offline_checker_clears_and_reads_cache() {
        let store = Arc::new(MemoryStore::new());
        store.put("db-version-latest-LIRR", &json!(9)).await.unwrap();
        store
            .put("db-version-latest-checked-LIRR", &json!(1_700_000_000_000i64))
            .await
            .unwrap();

        let checker = offline_checker(store.clone(), "LIRR", Some(DatabaseVersion::Number(4)));
        assert_eq!(
            checker.is_update_available("LIRR").await,
            Some(UpdateInfo::available(Some(DatabaseVersion::Number(9))))
        );

        checker.clear_db_version_latest("LIRR").await;
        assert!(store.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_offline_checker_never_reaches_network() {
        let checker = offline_checker(Arc::new(MemoryStore::new()), "LIRR", None);

        let result = checker.check("LIRR", true).await;
        assert!(matches!(
            result,
            Err(waypoint_updates::UpdateError::Api(ApiError::Configuration(_)))
        ));
    }
}
