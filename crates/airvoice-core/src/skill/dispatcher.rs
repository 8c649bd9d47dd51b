//! Ordered handler dispatch
//!
//! Handlers are tried in a fixed priority order and the first one whose
//! `can_handle` returns true processes the turn. The dispatcher is also the
//! error boundary: a handler error or panic becomes a generic apology that
//! keeps the session open, and the working record is rolled back.

use super::context::TurnContext;
use super::handlers;
use super::speech;
use crate::error::{Error, Result};
use crate::response::SkillResponse;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error};

/// A handler for one kind of turn
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Handler name (for logs)
    fn name(&self) -> &'static str;

    /// Whether this handler claims the turn
    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool;

    /// Process the turn
    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse>;
}

/// Priority-ordered handler list
pub struct Dispatcher {
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// The skill's handlers, highest priority first
    #[must_use]
    pub fn new() -> Self {
        Self::with_handlers(vec![
            Box::new(handlers::Launch),
            Box::new(handlers::SetUp),
            Box::new(handlers::RedirectToSetUp),
            Box::new(handlers::ChooseDevice),
            Box::new(handlers::RedirectToChooseDevice),
            Box::new(handlers::QueryReading),
            Box::new(handlers::Help),
            Box::new(handlers::CancelOrStop),
            Box::new(handlers::SessionEnded),
            Box::new(handlers::Fallback),
            Box::new(handlers::Unhandled),
        ])
    }

    /// Dispatcher over a custom handler list
    #[must_use]
    pub fn with_handlers(handlers: Vec<Box<dyn RequestHandler>>) -> Self {
        Self { handlers }
    }

    /// Handler names in priority order
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// First handler claiming the turn
    pub fn select(&self, ctx: &TurnContext<'_>) -> Option<&dyn RequestHandler> {
        self.handlers
            .iter()
            .find(|h| h.can_handle(ctx))
            .map(|h| h.as_ref())
    }

    /// Run the selected handler inside the error boundary
    pub async fn dispatch(&self, ctx: &mut TurnContext<'_>) -> SkillResponse {
        let Some(handler) = self.select(ctx) else {
            debug!("No handler claimed the turn");
            return speech::unhandled();
        };

        let name = handler.name();
        debug!(handler = name, phase = %ctx.phase(), "Dispatching turn");

        let snapshot = ctx.session.clone();
        let outcome = AssertUnwindSafe(handler.handle(ctx)).catch_unwind().await;

        let failure = match outcome {
            Ok(Ok(response)) => return response,
            Ok(Err(e)) => e,
            Err(payload) => Error::HandlerPanic(panic_message(payload.as_ref())),
        };

        error!(
            handler = name,
            user_id = %ctx.request.user_id(),
            error = %failure,
            "Handler failed, answering with apology"
        );
        ctx.session = snapshot;
        speech::apology()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
