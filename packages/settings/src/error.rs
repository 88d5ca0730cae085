// ABOUTME: Error types for settings access
// ABOUTME: Path validation and storage failures

use thiserror::Error;
use waypoint_storage::StorageError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings path is empty")]
    EmptyPath,

    #[error("Failed to persist settings: {0}")]
    Storage(#[from] StorageError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
