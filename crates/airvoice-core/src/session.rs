//! Session record
//!
//! The one piece of per-user state the skill keeps: the AirGradient API
//! token and the 1-based position of the default device. The persisted copy
//! is the source of truth; handlers mutate a working copy for the turn.

use crate::gate::GatePhase;
use serde::{Deserialize, Serialize};

/// Sentinel device index meaning "no device chosen yet"
pub const DEVICE_UNSET: i64 = -1;

/// Persisted per-user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// AirGradient API token (empty until set up)
    #[serde(default)]
    pub token: String,
    /// 1-based default device, or [`DEVICE_UNSET`]
    #[serde(rename = "device", default = "default_device")]
    pub device_index: i64,
}

fn default_device() -> i64 {
    DEVICE_UNSET
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            token: String::new(),
            device_index: DEVICE_UNSET,
        }
    }
}

impl SessionRecord {
    /// Create a record with a token and no device chosen
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            device_index: DEVICE_UNSET,
        }
    }

    /// Set the default device
    #[must_use]
    pub fn with_device(mut self, index: i64) -> Self {
        self.device_index = index;
        self
    }

    /// Whether an API token has been stored
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// Whether a default device has been chosen
    #[must_use]
    pub fn has_device(&self) -> bool {
        self.device_index != DEVICE_UNSET
    }

    /// Current gate phase
    #[must_use]
    pub fn phase(&self) -> GatePhase {
        GatePhase::of(self)
    }

    /// Forget the token and the device selection
    pub fn reset(&mut self) {
        self.token.clear();
        self.device_index = DEVICE_UNSET;
    }
}
