//! Availability state of the inference service.

use serde::{Deserialize, Serialize};

/// Service availability as last observed by the lifecycle manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    /// Never probed
    #[default]
    Unknown,
    Down,
    /// Launched, waiting out the grace period
    Starting,
    Up,
}

impl ServiceState {
    pub fn is_up(self) -> bool {
        self == Self::Up
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Down => "down",
            Self::Starting => "starting",
            Self::Up => "up",
        };
        f.write_str(s)
    }
}
