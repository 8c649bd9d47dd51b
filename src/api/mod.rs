//! Web API module for AirVoice
//!
//! Provides REST API endpoints for:
//! - Liveness checks
//! - Voice platform skill requests

pub mod health;
pub mod skill;

pub use health::health_routes;
pub use skill::skill_routes;
