//! Engine configuration, read from TOML.
//!
//! ```toml
//! [playback]
//! tick_interval_ms = 16
//! default_duration_ms = 1000
//! busy_policy = "cancel_and_restart"
//!
//! [loading]
//! duplicate_times = "reject"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// What `animate_to` does while another animation is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyPolicy {
    /// Drop the running animation and start the new one from the cursor.
    #[default]
    CancelAndRestart,
    /// Keep the running animation and ignore the new request.
    IgnoreIfBusy,
}

/// How two keyframes with the same time for one entity are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateTimePolicy {
    /// Fail the entity's load.
    #[default]
    Reject,
    /// The keyframe appearing later in the input wins.
    KeepLast,
}

/// Playback stepping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Fixed interval between ticks when the controller drives itself.
    pub tick_interval_ms: u64,
    /// Duration used by `animate_to_default`.
    pub default_duration_ms: u64,
    pub busy_policy: BusyPolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            default_duration_ms: 1000,
            busy_policy: BusyPolicy::CancelAndRestart,
        }
    }
}

/// Data-set loading settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub duplicate_times: DuplicateTimePolicy,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub playback: PlaybackConfig,
    pub loading: LoadConfig,
}

impl TimelineConfig {
    /// Parse a configuration from TOML text; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| TimelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
