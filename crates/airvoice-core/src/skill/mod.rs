//! Skill - turn processing
//!
//! Loads the user's session record, runs the first eligible handler inside
//! the error boundary and returns the response together with the record
//! to echo back as session attributes.
//!
//! # Module Structure
//!
//! - `context`: per-turn state handed to handlers
//! - `dispatcher`: priority-ordered handler list and error boundary
//! - `handlers`: one handler per kind of turn
//! - `measurement`: intent to API field to spoken unit mapping
//! - `speech`: spoken text

mod context;
mod dispatcher;
mod handlers;
mod measurement;
mod speech;


pub use context::TurnContext;
pub use dispatcher::{Dispatcher, RequestHandler};
pub use measurement::Measurement;

use crate::error::Result;
use crate::memory::SessionStore;
use crate::request::{RequestType, SkillRequest};
use crate::response::SkillResponse;
use crate::session::SessionRecord;
use airvoice_devices::DeviceDirectory;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Default spoken skill name
pub const DEFAULT_SKILL_NAME: &str = "Voice Assistant for AirGradient";

/// Skill settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Spoken skill name
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    DEFAULT_SKILL_NAME.to_string()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl SkillConfig {
    /// Set the spoken skill name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Result of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Response to speak
    pub response: SkillResponse,
    /// Session record to echo back on the next turn
    pub session_attributes: SessionRecord,
}

/// The skill: device directory, session store and handler chain
pub struct Skill {
    config: SkillConfig,
    directory: Arc<dyn DeviceDirectory>,
    store: Arc<dyn SessionStore>,
    dispatcher: Dispatcher,
}

impl Skill {
    /// Create a skill with the default handler chain
    pub fn new(
        config: SkillConfig,
        directory: Arc<dyn DeviceDirectory>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            directory,
            store,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Replace the handler chain
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Skill settings
    #[must_use]
    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Process one turn
    ///
    /// Never fails: storage, directory and handler failures all end in a
    /// spoken apology that keeps the session open.
    #[instrument(
        skip(self, request),
        fields(
            user_id = %request.user_id(),
            request_type = ?request.request_type(),
            intent = request.intent_name().unwrap_or("-"),
        )
    )]
    pub async fn handle(&self, request: &SkillRequest) -> TurnOutcome {
        let session = match self.load_session(request).await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Failed to load session record");
                let outcome = TurnOutcome {
                    response: speech::apology(),
                    session_attributes: request.session.attributes.clone().unwrap_or_default(),
                };
                log_response(&outcome);
                return outcome;
            }
        };

        let mut ctx = TurnContext::new(
            request,
            session,
            &self.config,
            self.directory.as_ref(),
            self.store.as_ref(),
        );
        let response = self.dispatcher.dispatch(&mut ctx).await;

        let outcome = TurnOutcome {
            response,
            session_attributes: ctx.session,
        };
        log_response(&outcome);
        outcome
    }

    /// Working record for a turn
    ///
    /// Launches and the first turn of a new session always start from the
    /// persisted record. Other turns use the attributes echoed back by the
    /// platform, falling back to the persisted record when none arrive.
    async fn load_session(&self, request: &SkillRequest) -> Result<SessionRecord> {
        if request.request_type() != RequestType::Launch && !request.session.new {
            if let Some(attributes) = &request.session.attributes {
                return Ok(attributes.clone());
            }
        }

        let persisted = self.store.get(request.user_id()).await?;
        debug!(found = persisted.is_some(), "Loaded persisted session record");
        Ok(persisted.unwrap_or_default())
    }
}

fn log_response(outcome: &TurnOutcome) {
    info!(
        speech = %outcome.response.speech_text,
        reprompt = outcome.response.reprompt_text.as_deref().unwrap_or(""),
        should_end_session = outcome.response.should_end_session,
        phase = %outcome.session_attributes.phase(),
        "Response"
    );
}
