//! Per-turn context handed to handlers

use super::SkillConfig;
use crate::error::Result;
use crate::gate::{self, GatePhase};
use crate::memory::SessionStore;
use crate::request::SkillRequest;
use crate::session::SessionRecord;
use airvoice_devices::DeviceDirectory;
use tracing::debug;

/// State of one turn
///
/// `session` is the working copy of the user's record. Handlers mutate it
/// and call [`TurnContext::persist`] to write it through to the store.
pub struct TurnContext<'a> {
    /// Inbound request
    pub request: &'a SkillRequest,
    /// Working session record
    pub session: SessionRecord,
    config: &'a SkillConfig,
    directory: &'a dyn DeviceDirectory,
    store: &'a dyn SessionStore,
}

impl<'a> TurnContext<'a> {
    /// Create a context around a loaded session record
    pub fn new(
        request: &'a SkillRequest,
        session: SessionRecord,
        config: &'a SkillConfig,
        directory: &'a dyn DeviceDirectory,
        store: &'a dyn SessionStore,
    ) -> Self {
        Self {
            request,
            session,
            config,
            directory,
            store,
        }
    }

    /// Gate phase of the working record
    #[must_use]
    pub fn phase(&self) -> GatePhase {
        self.session.phase()
    }

    /// No token yet
    #[must_use]
    pub fn not_set_up(&self) -> bool {
        gate::not_set_up(&self.session)
    }

    /// No default device yet
    #[must_use]
    pub fn not_chosen(&self) -> bool {
        gate::not_chosen(&self.session)
    }

    /// Skill settings
    #[must_use]
    pub fn config(&self) -> &'a SkillConfig {
        self.config
    }

    /// Device directory
    #[must_use]
    pub fn directory(&self) -> &'a dyn DeviceDirectory {
        self.directory
    }

    /// Write the working record to the store
    pub async fn persist(&self) -> Result<()> {
        debug!(
            user_id = %self.request.user_id(),
            phase = %self.phase(),
            "Persisting session record"
        );
        self.store.save(self.request.user_id(), &self.session).await
    }
}
