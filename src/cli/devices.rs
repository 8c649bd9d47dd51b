//! `airvoice devices` - list the devices behind a token

use crate::server::load_config;
use airvoice_devices::{mask_token, AirGradientClient, DeviceDirectory, DeviceList};
use anyhow::{Context, Result};
use tracing::info;

/// Fetch and print the device list
pub async fn run(token: &str) -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    let client = AirGradientClient::new(config.airgradient)
        .context("Failed to create AirGradient client")?;

    info!(token = %mask_token(token), "Listing devices");
    let list = client
        .list_devices(token)
        .await
        .context("Failed to list devices")?;

    print!("{}", render(&list));
    Ok(())
}

fn render(list: &DeviceList) -> String {
    if list.is_empty() {
        return "No devices on this account.\n".to_string();
    }

    let mut out = String::new();
    for (position, device) in list.devices.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", position + 1, device.location_name));
        for (name, value) in device.current_readings() {
            out.push_str(&format!("     {:<12} {}\n", name, value));
        }
    }
    out
}
