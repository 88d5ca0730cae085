// ABOUTME: Database version and update report types
// ABOUTME: Versions are integers or strings and order integers before strings

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Version of an agency's reference database.
///
/// Integers compare numerically and strings lexicographically. Any integer
/// orders below any string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatabaseVersion {
    Number(u64),
    Text(String),
}

impl fmt::Display for DatabaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseVersion::Number(n) => write!(f, "{}", n),
            DatabaseVersion::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for DatabaseVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<u64>()
            .map(DatabaseVersion::Number)
            .unwrap_or_else(|_| DatabaseVersion::Text(s.to_string())))
    }
}

impl From<u64> for DatabaseVersion {
    fn from(n: u64) -> Self {
        DatabaseVersion::Number(n)
    }
}

impl From<&str> for DatabaseVersion {
    fn from(s: &str) -> Self {
        DatabaseVersion::Text(s.to_string())
    }
}

/// Body of `GET /updates/database/{agency}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseUpdate {
    pub version: DatabaseVersion,
}

/// Update report handed back to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub is_available: bool,
    pub version: Option<DatabaseVersion>,
}

impl UpdateInfo {
    pub fn available(version: Option<DatabaseVersion>) -> Self {
        Self {
            is_available: true,
            version,
        }
    }
}
