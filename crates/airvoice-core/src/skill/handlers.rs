//! Turn handlers
//!
//! Listed here in the order the dispatcher tries them.

use super::context::TurnContext;
use super::dispatcher::RequestHandler;
use super::measurement::Measurement;
use super::speech;
use crate::error::{Error, Result};
use crate::gate::GatePhase;
use crate::request::{intents, RequestType};
use crate::response::SkillResponse;
use crate::session::DEVICE_UNSET;
use airvoice_devices::{mask_token, DeviceList};
use async_trait::async_trait;
use tracing::{info, warn};

/// Outcome of validating a token against the device directory
enum Lookup {
    /// Token accepted and persisted
    Devices(DeviceList),
    /// Token accepted but the account has no devices; nothing persisted
    NoDevices,
    /// Token rejected or the API was unreachable
    Failed,
}

/// List the devices behind `token` and store it on success
///
/// A single-device account also gets that device selected, and a stored
/// device position the new account does not have is cleared.
async fn retrieve_devices(ctx: &mut TurnContext<'_>, token: &str) -> Result<Lookup> {
    let list = match ctx.directory().list_devices(token).await {
        Ok(list) => list,
        Err(e) => {
            warn!(
                token = %mask_token(token),
                transient = e.is_transient(),
                error = %e,
                "Device listing failed"
            );
            return Ok(Lookup::Failed);
        }
    };

    if list.is_empty() {
        info!(token = %mask_token(token), "Token accepted but account has no devices");
        return Ok(Lookup::NoDevices);
    }

    ctx.session.token = token.to_string();
    if list.is_single() {
        ctx.session.device_index = 1;
    } else if list.get(ctx.session.device_index).is_none() {
        ctx.session.device_index = DEVICE_UNSET;
    }
    ctx.persist().await?;

    info!(
        token = %mask_token(token),
        devices = list.len(),
        "Token stored"
    );
    Ok(Lookup::Devices(list))
}

/// Opening the skill
pub struct Launch;

#[async_trait]
impl RequestHandler for Launch {
    fn name(&self) -> &'static str {
        "launch"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.request.request_type() == RequestType::Launch
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        if ctx.not_set_up() {
            ctx.session.reset();
            return Ok(speech::welcome_setup());
        }
        Ok(speech::welcome_back())
    }
}

/// Receiving the API token
pub struct SetUp;

#[async_trait]
impl RequestHandler for SetUp {
    fn name(&self) -> &'static str {
        "set_up"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.not_set_up() && ctx.request.is_intent(intents::SET_UP)
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        let token = ctx
            .request
            .slot_value(intents::TOKEN_SLOT)
            .ok_or_else(|| Error::MissingSlot(intents::TOKEN_SLOT.to_string()))?
            .to_string();

        let response = match retrieve_devices(ctx, &token).await? {
            Lookup::Devices(list) => match list.get(ctx.session.device_index) {
                Some(device) => speech::token_saved(&device.location_name),
                None => speech::choose_from(&list.names),
            },
            Lookup::NoDevices => speech::no_devices(),
            Lookup::Failed => speech::token_rejected(),
        };
        Ok(response)
    }
}

/// Anything else before a token is stored
pub struct RedirectToSetUp;

#[async_trait]
impl RequestHandler for RedirectToSetUp {
    fn name(&self) -> &'static str {
        "redirect_to_set_up"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.not_set_up() && ctx.request.is_redirectable()
    }

    async fn handle(&self, _ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        Ok(speech::redirect_setup())
    }
}

/// Receiving the default device number
pub struct ChooseDevice;

#[async_trait]
impl RequestHandler for ChooseDevice {
    fn name(&self) -> &'static str {
        "choose_device"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        !ctx.not_set_up() && ctx.not_chosen() && ctx.request.is_intent(intents::CHOOSE_DEVICE)
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        let Some(index) = ctx
            .request
            .slot_value(intents::DEVICE_SLOT)
            .and_then(|v| v.parse::<i64>().ok())
        else {
            return Ok(speech::device_rejected());
        };

        let token = ctx.session.token.clone();
        let device = match ctx.directory().device_info(&token, index).await {
            Ok(device) => device,
            Err(e) => {
                warn!(index, error = %e, "Device selection rejected");
                return Ok(speech::device_rejected());
            }
        };

        ctx.session.device_index = index;
        ctx.persist().await?;
        info!(index, device = %device.location_name, "Default device stored");

        Ok(speech::device_saved(&device.location_name))
    }
}

/// Anything else while the device is still to be chosen
pub struct RedirectToChooseDevice;

#[async_trait]
impl RequestHandler for RedirectToChooseDevice {
    fn name(&self) -> &'static str {
        "redirect_to_choose_device"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        !ctx.not_set_up() && ctx.not_chosen() && ctx.request.is_redirectable()
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        let token = ctx.session.token.clone();
        let response = match retrieve_devices(ctx, &token).await? {
            Lookup::Devices(list) => match list.get(ctx.session.device_index) {
                Some(device) => speech::only_device(&device.location_name),
                None => speech::redirect_choose(&list.names),
            },
            Lookup::NoDevices => speech::no_devices(),
            Lookup::Failed => speech::account_unreachable(),
        };
        Ok(response)
    }
}

/// Measurement queries once set up
pub struct QueryReading;

#[async_trait]
impl RequestHandler for QueryReading {
    fn name(&self) -> &'static str {
        "query_reading"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.phase() == GatePhase::Ready
            && ctx.request.request_type() == RequestType::Intent
            && ctx
                .request
                .intent_name()
                .and_then(Measurement::from_intent)
                .is_some()
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        let measurement = ctx
            .request
            .intent_name()
            .and_then(Measurement::from_intent)
            .ok_or_else(|| Error::Internal("query without measurement intent".to_string()))?;

        let device = match ctx
            .directory()
            .device_info(&ctx.session.token, ctx.session.device_index)
            .await
        {
            Ok(device) => device,
            Err(e) => {
                warn!(
                    index = ctx.session.device_index,
                    measurement = measurement.label(),
                    error = %e,
                    "Reading unavailable"
                );
                return Ok(speech::reading_unavailable());
            }
        };

        Ok(speech::reading(measurement.describe(&device)))
    }
}

/// Built-in help
pub struct Help;

#[async_trait]
impl RequestHandler for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.request.is_intent(intents::HELP)
    }

    async fn handle(&self, _ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        let labels: Vec<&str> = Measurement::ALL.iter().map(|m| m.label()).collect();
        Ok(speech::help(&labels))
    }
}

/// Built-in cancel and stop
pub struct CancelOrStop;

#[async_trait]
impl RequestHandler for CancelOrStop {
    fn name(&self) -> &'static str {
        "cancel_or_stop"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.request.is_cancel_or_stop()
    }

    async fn handle(&self, _ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        Ok(speech::goodbye())
    }
}

/// The platform closed the session
pub struct SessionEnded;

#[async_trait]
impl RequestHandler for SessionEnded {
    fn name(&self) -> &'static str {
        "session_ended"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.request.request_type() == RequestType::SessionEnded
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        info!(
            user_id = %ctx.request.user_id(),
            reason = ctx.request.request.reason.as_deref().unwrap_or("unknown"),
            "Session ended"
        );
        Ok(SkillResponse::silent())
    }
}

/// Built-in fallback
///
/// Only reached once ready; earlier phases redirect the fallback intent.
pub struct Fallback;

#[async_trait]
impl RequestHandler for Fallback {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn can_handle(&self, ctx: &TurnContext<'_>) -> bool {
        ctx.request.is_intent(intents::FALLBACK)
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        Ok(speech::fallback(&ctx.config().name))
    }
}

/// Catch-all
pub struct Unhandled;

#[async_trait]
impl RequestHandler for Unhandled {
    fn name(&self) -> &'static str {
        "unhandled"
    }

    fn can_handle(&self, _ctx: &TurnContext<'_>) -> bool {
        true
    }

    async fn handle(&self, ctx: &mut TurnContext<'_>) -> Result<SkillResponse> {
        info!(
            request_type = ?ctx.request.request_type(),
            intent = ctx.request.intent_name().unwrap_or("-"),
            "Unhandled turn"
        );
        Ok(speech::unhandled())
    }
}
