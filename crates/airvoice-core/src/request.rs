//! Inbound request model
//!
//! A reduced view of the voice platform's event: the request type, the
//! resolved intent with its slots, and the session block. Nothing else from
//! the platform envelope is read.

use crate::session::SessionRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Intent and slot names the skill understands
pub mod intents {
    /// Store the API token
    pub const SET_UP: &str = "setUp";
    /// Choose the default device
    pub const CHOOSE_DEVICE: &str = "chooseDevice";
    /// Carbon dioxide query
    pub const CARBON_DIOXIDE: &str = "carbonDioxide";
    /// PM2.5 query
    pub const PARTICULATE_MATTER: &str = "particulateMatter";
    /// Temperature query
    pub const TEMPERATURE: &str = "temperature";
    /// Relative humidity query
    pub const HUMIDITY: &str = "humidity";
    /// Built-in help
    pub const HELP: &str = "AMAZON.HelpIntent";
    /// Built-in cancel
    pub const CANCEL: &str = "AMAZON.CancelIntent";
    /// Built-in stop
    pub const STOP: &str = "AMAZON.StopIntent";
    /// Built-in fallback (utterance matched nothing)
    pub const FALLBACK: &str = "AMAZON.FallbackIntent";

    /// Slot carrying the spoken or typed API token
    pub const TOKEN_SLOT: &str = "token";
    /// Slot carrying the spoken device number
    pub const DEVICE_SLOT: &str = "device";
}

/// Request type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    /// The user opened the skill without an intent
    #[serde(rename = "LaunchRequest")]
    Launch,
    /// A resolved intent
    #[serde(rename = "IntentRequest")]
    Intent,
    /// The platform closed the session
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded,
    /// Any other platform event (for example `System.ExceptionEncountered`)
    #[serde(other)]
    Other,
}

/// Slot value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Resolved value, absent when the user did not fill the slot
    #[serde(default)]
    pub value: Option<String>,
}

/// Resolved intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name
    pub name: String,
    /// Slots keyed by slot name
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

/// The `request` block of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Request type
    #[serde(rename = "type")]
    pub request_type: RequestType,
    /// Intent (intent requests only)
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Why the session ended (session-ended requests only)
    #[serde(default)]
    pub reason: Option<String>,
}

/// The `session` block of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Platform session identifier
    pub session_id: String,
    /// Whether this is the first event of the session
    #[serde(default)]
    pub new: bool,
    /// End-user identity (persistence key)
    pub user_id: String,
    /// Session attributes echoed back from the previous turn
    #[serde(default)]
    pub attributes: Option<SessionRecord>,
}

/// An inbound event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequest {
    /// Request block
    pub request: RequestBody,
    /// Session block
    pub session: SessionInfo,
}

impl SkillRequest {
    fn new(user_id: impl Into<String>, request: RequestBody) -> Self {
        let user_id = user_id.into();
        Self {
            request,
            session: SessionInfo {
                session_id: format!("session:{}", user_id),
                new: false,
                user_id,
                attributes: None,
            },
        }
    }

    /// A launch request opening a new session
    #[must_use]
    pub fn launch(user_id: impl Into<String>) -> Self {
        let mut request = Self::new(
            user_id,
            RequestBody {
                request_type: RequestType::Launch,
                intent: None,
                reason: None,
            },
        );
        request.session.new = true;
        request
    }

    /// An intent request without slots
    #[must_use]
    pub fn intent(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            user_id,
            RequestBody {
                request_type: RequestType::Intent,
                intent: Some(Intent {
                    name: name.into(),
                    slots: HashMap::new(),
                }),
                reason: None,
            },
        )
    }

    /// A session-ended request
    #[must_use]
    pub fn session_ended(user_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            user_id,
            RequestBody {
                request_type: RequestType::SessionEnded,
                intent: None,
                reason: Some(reason.into()),
            },
        )
    }

    /// Fill a slot (no-op for requests without an intent)
    #[must_use]
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(intent) = self.request.intent.as_mut() {
            intent.slots.insert(
                name.into(),
                Slot {
                    value: Some(value.into()),
                },
            );
        }
        self
    }

    /// Attach the session attributes from a previous turn
    #[must_use]
    pub fn with_attributes(mut self, attributes: SessionRecord) -> Self {
        self.session.attributes = Some(attributes);
        self
    }

    /// End-user identity
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.session.user_id
    }

    /// Request type
    #[must_use]
    pub fn request_type(&self) -> RequestType {
        self.request.request_type
    }

    /// Intent name, for intent requests
    #[must_use]
    pub fn intent_name(&self) -> Option<&str> {
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    /// Whether this is an intent request for `name`
    #[must_use]
    pub fn is_intent(&self, name: &str) -> bool {
        self.request.request_type == RequestType::Intent && self.intent_name() == Some(name)
    }

    /// Whether the user asked to leave (cancel or stop)
    #[must_use]
    pub fn is_cancel_or_stop(&self) -> bool {
        self.is_intent(intents::CANCEL) || self.is_intent(intents::STOP)
    }

    /// Whether the turn may be redirected to setup or device choice
    ///
    /// Leaving the skill, the platform closing the session and unknown
    /// platform events are never redirected.
    #[must_use]
    pub fn is_redirectable(&self) -> bool {
        !self.is_cancel_or_stop()
            && matches!(
                self.request.request_type,
                RequestType::Launch | RequestType::Intent
            )
    }

    /// Trimmed, non-empty value of a slot
    #[must_use]
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()?
            .slots
            .get(name)?
            .value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
