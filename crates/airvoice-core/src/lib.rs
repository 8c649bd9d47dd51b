//! AirVoice Core - Skill Engine
//!
//! This crate provides the conversational core of the AirVoice skill,
//! including:
//! - Session: the persisted `{token, device}` record and its gate phases
//! - Memory: session record storage (SQLite, Redis, in-memory)
//! - Request/Response: the inbound event and outbound speech models
//! - Skill: the ordered intent dispatcher and its handlers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod gate;
pub mod memory;
pub mod request;
pub mod response;
pub mod session;
pub mod skill;

pub use error::{Error, Result};
pub use gate::GatePhase;
pub use memory::{
    MemoryStore, RedisStore, SessionBackend, SessionBackendConfig, SessionStore, SqliteStore,
};
pub use request::{intents, Intent, RequestType, SessionInfo, SkillRequest, Slot};
pub use response::{join_device_names, SkillResponse};
pub use session::{SessionRecord, DEVICE_UNSET};
pub use skill::{
    Dispatcher, Measurement, RequestHandler, Skill, SkillConfig, TurnContext, TurnOutcome,
    DEFAULT_SKILL_NAME,
};
