//! Setup/selection gate
//!
//! Derives the conversation phase from a [`SessionRecord`]. Handlers are
//! only eligible in the phase they serve:
//!
//! - `Unset`: no token, only setup is possible
//! - `Unchosen`: token stored, no default device yet
//! - `Ready`: token and device stored, measurements can be queried

use crate::session::SessionRecord;
use serde::Serialize;

/// Gate phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GatePhase {
    /// Token empty
    Unset,
    /// Token present, device index is the sentinel
    Unchosen,
    /// Token present and device chosen
    Ready,
}

impl GatePhase {
    /// Phase of a session record
    #[must_use]
    pub fn of(record: &SessionRecord) -> Self {
        if !record.has_token() {
            Self::Unset
        } else if !record.has_device() {
            Self::Unchosen
        } else {
            Self::Ready
        }
    }

    /// Get the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Unchosen => "unchosen",
            Self::Ready => "ready",
        }
    }
}

impl std::fmt::Display for GatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// No token stored yet
#[must_use]
pub fn not_set_up(record: &SessionRecord) -> bool {
    GatePhase::of(record) == GatePhase::Unset
}

/// No default device chosen yet (regardless of token)
#[must_use]
pub fn not_chosen(record: &SessionRecord) -> bool {
    !record.has_device()
}
