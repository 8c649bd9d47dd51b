//! Outbound response model

use serde::{Deserialize, Serialize};

/// Spoken response for one turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    /// Text spoken to the user
    pub speech_text: String,
    /// Text spoken if the user stays silent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt_text: Option<String>,
    /// Whether the platform should close the session
    pub should_end_session: bool,
}

impl SkillResponse {
    /// Speak and keep the session open
    #[must_use]
    pub fn speak(speech_text: impl Into<String>) -> Self {
        Self {
            speech_text: speech_text.into(),
            reprompt_text: None,
            should_end_session: false,
        }
    }

    /// A response with no speech (session-ended acknowledgements)
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Set the reprompt
    #[must_use]
    pub fn ask(mut self, reprompt_text: impl Into<String>) -> Self {
        self.reprompt_text = Some(reprompt_text.into());
        self
    }

    /// Close the session after speaking
    #[must_use]
    pub fn end_session(mut self) -> Self {
        self.should_end_session = true;
        self
    }
}

/// Join device names for speech: `"A, B, and C"`
///
/// All names but the last are joined with `", "`, and the last one is
/// appended with `", and "`, so two names read `"A, and B"`. A single
/// name is returned as is.
#[must_use]
pub fn join_device_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{}, and {}", head.join(", "), last),
    }
}
