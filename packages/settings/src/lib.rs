// ABOUTME: Settings package for Waypoint
// ABOUTME: Nested settings document merged from compiled-in defaults and saved user overrides

pub mod accessor;
pub mod document;
pub mod error;
pub mod path;

pub use accessor::SettingsAccessor;
pub use document::{assign, deep_merge, merge_into, resolve};
pub use error::{SettingsError, SettingsResult};
pub use path::{PathSegment, SettingsPath};
