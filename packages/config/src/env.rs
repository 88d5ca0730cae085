// ABOUTME: Environment variable parsing utilities
// ABOUTME: Typed lookups with defaults, validation and warnings for bad values

use std::str::FromStr;

/// Parse an environment variable, falling back to `default` when it is unset
/// or unparseable.
pub fn parse_env_or_default<T>(var_name: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(var_name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Parse an environment variable and keep it only if `validator` accepts it.
///
/// Unset variables silently yield the default. Set but unparseable or
/// rejected values log a warning first.
pub fn parse_env_or_default_with_validation<T, F>(var_name: &str, default: T, validator: F) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(T) -> bool,
{
    let Ok(raw_value) = std::env::var(var_name) else {
        return default;
    };

    match raw_value.trim().parse::<T>() {
        Ok(parsed) if validator(parsed) => parsed,
        Ok(_) => {
            tracing::warn!(
                "Environment variable {} has invalid value '{}', using default: {}",
                var_name,
                raw_value,
                default
            );
            default
        }
        Err(_) => {
            tracing::warn!(
                "Environment variable {} has unparseable value '{}', using default: {}",
                var_name,
                raw_value,
                default
            );
            default
        }
    }
}

/// Read a string variable, treating blank values as unset
pub fn env_string_or_default(var_name: &str, default: &str) -> String {
    std::env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_env_or_default_not_set() {
        std::env::remove_var("WAYPOINT_TEST_NOT_SET");
        let result: u64 = parse_env_or_default("WAYPOINT_TEST_NOT_SET", 3600);
        assert_eq!(result, 3600);
    }

    #[test]
    #[serial]
    fn test_parse_env_or_default_set() {
        std::env::set_var("WAYPOINT_TEST_SET", " 120 ");
        let result: u64 = parse_env_or_default("WAYPOINT_TEST_SET", 3600);
        assert_eq!(result, 120);
        std::env::remove_var("WAYPOINT_TEST_SET");
    }

    #[test]
    #[serial]
    fn test_parse_env_or_default_invalid() {
        std::env::set_var("WAYPOINT_TEST_INVALID", "hourly");
        let result: u64 = parse_env_or_default("WAYPOINT_TEST_INVALID", 3600);
        assert_eq!(result, 3600);
        std::env::remove_var("WAYPOINT_TEST_INVALID");
    }

    #[test]
    #[serial]
    fn test_parse_env_with_validation() {
        std::env::set_var("WAYPOINT_TEST_TIMEOUT", "45");
        let result =
            parse_env_or_default_with_validation("WAYPOINT_TEST_TIMEOUT", 30u64, |v| {
                (1..=300).contains(&v)
            });
        assert_eq!(result, 45);
        std::env::remove_var("WAYPOINT_TEST_TIMEOUT");
    }

    #[test]
    #[serial]
    fn test_parse_env_with_validation_rejects_out_of_range() {
        std::env::set_var("WAYPOINT_TEST_TIMEOUT_RANGE", "0");
        let result =
            parse_env_or_default_with_validation("WAYPOINT_TEST_TIMEOUT_RANGE", 30u64, |v| {
                (1..=300).contains(&v)
            });
        assert_eq!(result, 30);
        std::env::remove_var("WAYPOINT_TEST_TIMEOUT_RANGE");
    }

    #[test]
    #[serial]
    fn test_env_string_blank_is_default() {
        std::env::set_var("WAYPOINT_TEST_URL", "   ");
        assert_eq!(
            env_string_or_default("WAYPOINT_TEST_URL", "https://api.waypoint.app"),
            "https://api.waypoint.app"
        );
        std::env::set_var("WAYPOINT_TEST_URL", "http://localhost:3000");
        assert_eq!(
            env_string_or_default("WAYPOINT_TEST_URL", "https://api.waypoint.app"),
            "http://localhost:3000"
        );
        std::env::remove_var("WAYPOINT_TEST_URL");
    }
}
