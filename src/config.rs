/// User options stored under `copierOptions`
use crate::recency::{DuplicatePolicy, DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};

pub const OPTIONS_KEY: &str = "copierOptions";
pub const HISTORY_KEY: &str = "recentCopies";
pub const VISITED_KEY: &str = "recentPages";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopierConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// How long the "Copied" marker stays visible
    #[serde(default = "default_copied_marker_ms")]
    pub copied_marker_ms: u32,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    #[serde(default = "default_visited_capacity")]
    pub visited_capacity: usize,
}

impl CopierConfig {
    /// Read options from a stored value, falling back to defaults
    pub fn from_stored(value: Option<serde_json::Value>) -> CopierConfig {
        let Some(value) = value else {
            return CopierConfig::default();
        };

        match serde_json::from_value::<CopierConfig>(value) {
            Ok(config) => config.normalized(),
            Err(e) => {
                log::warn!("Ignoring malformed options, using defaults: {}", e);
                CopierConfig::default()
            }
        }
    }

    fn normalized(mut self) -> CopierConfig {
        if self.history_capacity == 0 {
            log::warn!("historyCapacity must be at least 1, using 1");
            self.history_capacity = 1;
        }
        if self.visited_capacity == 0 {
            log::warn!("visitedCapacity must be at least 1, using 1");
            self.visited_capacity = 1;
        }
        self
    }
}

impl Default for CopierConfig {
    fn default() -> Self {
        CopierConfig {
            history_capacity: default_history_capacity(),
            copied_marker_ms: default_copied_marker_ms(),
            duplicate_policy: DuplicatePolicy::default(),
            visited_capacity: default_visited_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_visited_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_copied_marker_ms() -> u32 {
    1000
}
