// ABOUTME: Configuration package for Waypoint
// ABOUTME: Environment variable names, env parsing helpers, compiled-in defaults and logging setup

pub mod constants;
pub mod defaults;
pub mod env;
pub mod logging;

pub use defaults::{default_settings, SETTINGS_KEY};
pub use env::{parse_env_or_default, parse_env_or_default_with_validation};
pub use logging::init_tracing;
