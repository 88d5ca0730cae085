// ABOUTME: Update checks for per-agency reference databases
// ABOUTME: Polls the Waypoint API at most once per interval and caches the latest version

pub mod api;
pub mod checker;
pub mod clock;
pub mod error;
pub mod installed;
pub mod version;

pub use api::{ApiClient, ApiClientConfig, HttpApiClient};
pub use checker::{UpdateChecker, UpdateCheckerConfig};
pub use clock::{Clock, SystemClock};
pub use error::{ApiError, ApiResult, UpdateError, UpdateResult};
pub use installed::{FixedInstalledVersions, InstalledVersions};
pub use version::{DatabaseUpdate, DatabaseVersion, UpdateInfo};
