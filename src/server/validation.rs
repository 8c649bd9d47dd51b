//! Production configuration validation
//!
//! Security checks for production deployments.

use super::config::AppConfig;
use anyhow::{bail, Result};
use tracing::warn;

/// Validate configuration for production security
pub fn validate_production_config(config: &AppConfig) -> Result<()> {
    if config.airgradient.timeout_secs == 0 {
        bail!("airgradient.timeout_secs must be greater than zero");
    }

    let is_production = std::env::var("AIRVOICE_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    if !is_production {
        return Ok(());
    }

    if config.server.host == "0.0.0.0" {
        warn!(
            "SECURITY WARNING: Server is binding to all interfaces (0.0.0.0) in production. \
             Consider binding to 127.0.0.1 and using a reverse proxy."
        );
    }

    if config.persistence.backend == "memory" {
        warn!(
            "Persistence backend is 'memory' in production. \
             Tokens and device choices will be lost on restart."
        );
    }

    if config.persistence.backend == "redis" {
        let url = config.persistence.redis_url.as_deref().unwrap_or("");
        if url.starts_with("redis://") && !url.contains('@') {
            warn!(
                "SECURITY WARNING: Redis connection appears to have no authentication in production. \
                 Session records hold API tokens; consider enabling Redis AUTH."
            );
        }
    }

    if !config.airgradient.base_url.starts_with("https://") {
        warn!(
            base_url = %config.airgradient.base_url,
            "SECURITY WARNING: AirGradient API is not reached over HTTPS; tokens travel in the query string."
        );
    }

    Ok(())
}
