//! AirVoice Devices - AirGradient Device Directory
//!
//! This crate provides the client for the AirGradient public API:
//! - Listing the devices (locations) attached to an API token
//! - Selecting a single device by its 1-based position
//! - Decoding the current measurements reported by each device

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod device;
pub mod error;

pub use client::{mask_token, AirGradientClient, AirGradientConfig, DeviceDirectory};
pub use device::{DeviceList, DeviceRecord};
pub use error::{Error, Result};

#[cfg(feature = "mock")]
pub use client::MockDeviceDirectory;
