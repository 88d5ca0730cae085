// ABOUTME: Compiled-in default settings document
// ABOUTME: Every settings read starts from a fresh copy of this document

use serde_json::{json, Value};

/// Store key under which user overrides of the settings document live
pub const SETTINGS_KEY: &str = "settings";

/// Build the canonical default settings document.
///
/// A new value is returned on every call, so callers may mutate it freely.
pub fn default_settings() -> Value {
    json!({
        "general": {
            "defaultAgency": null,
            "language": "en",
            "units": "imperial"
        },
        "display": {
            "theme": "light",
            "timeFormat": "12h",
            "showPlatform": true,
            "showTransfers": true
        },
        "trips": {
            "departureTime": "now",
            "preferredTransferStations": [],
            "allowChangeInTransferStation": false,
            "maxTransfers": 2,
            "minLayoverMins": 0,
            "maxLayoverMins": 30
        },
        "favorites": {
            "homePage": {
                "showStations": true,
                "showTrips": true
            }
        },
        "updates": {
            "autoCheck": true,
            "notify": true
        }
    })
}
