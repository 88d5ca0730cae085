// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names and their defaults

use std::env;
use std::path::PathBuf;

// Remote API
pub const WAYPOINT_API_URL: &str = "WAYPOINT_API_URL";
pub const WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS: &str = "WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS";

// Update checks
pub const WAYPOINT_UPDATE_CHECK_INTERVAL_SECS: &str = "WAYPOINT_UPDATE_CHECK_INTERVAL_SECS";

// Local storage
pub const WAYPOINT_DATA_DIR: &str = "WAYPOINT_DATA_DIR";

// System Environment Variables
pub const HOME: &str = "HOME";

pub const DEFAULT_API_URL: &str = "https://api.waypoint.app";
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_HTTP_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Seconds between two remote checks for the same agency
pub const DEFAULT_UPDATE_CHECK_INTERVAL_SECS: u64 = 3600;

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE: &str = "waypoint.db";

/// Get the path to the Waypoint data directory.
///
/// `WAYPOINT_DATA_DIR` wins, then `$HOME/.waypoint`, then the platform home
/// directory. Falls back to `./.waypoint` when no home can be found.
pub fn waypoint_dir() -> PathBuf {
    if let Ok(dir) = env::var(WAYPOINT_DATA_DIR) {
        return PathBuf::from(dir);
    }

    // HOME first, useful for tests
    if let Ok(home) = env::var(HOME) {
        PathBuf::from(home).join(".waypoint")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".waypoint")
    }
}

/// Get the path to the key-value database (~/.waypoint/waypoint.db)
pub fn database_file() -> PathBuf {
    waypoint_dir().join(DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_data_dir_override() {
        env::set_var(WAYPOINT_DATA_DIR, "/tmp/waypoint-test-dir");
        assert_eq!(waypoint_dir(), PathBuf::from("/tmp/waypoint-test-dir"));
        assert_eq!(
            database_file(),
            PathBuf::from("/tmp/waypoint-test-dir/waypoint.db")
        );
        env::remove_var(WAYPOINT_DATA_DIR);
    }

    #[test]
    #[serial]
    fn test_data_dir_under_home() {
        env::remove_var(WAYPOINT_DATA_DIR);
        let original = env::var(HOME).ok();
        env::set_var(HOME, "/home/rider");

        assert_eq!(waypoint_dir(), PathBuf::from("/home/rider/.waypoint"));

        match original {
            Some(home) => env::set_var(HOME, home),
            None => env::remove_var(HOME),
        }
    }
}
