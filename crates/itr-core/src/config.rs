//! Tracker configuration.

use serde::{Deserialize, Serialize};

/// Name the tracker is published under when none is configured.
pub const DEFAULT_TRACKER_NAME: &str = "$userTracker";

/// Settings consumed by [`InteractionTracker::new`](crate::InteractionTracker::new).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Whether operations do anything. Trackers are inert until enabled.
    pub enabled: bool,
    /// Shared reference name, used to label diagnostics.
    pub name: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: DEFAULT_TRACKER_NAME.to_string(),
        }
    }
}

impl TrackerConfig {
    /// An enabled configuration with the default name.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}
