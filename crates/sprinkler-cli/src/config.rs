//! CLI-side configuration: applies command-line overrides on top of the
//! figment-loaded profile from `sprinkler-config`.

use std::time::Duration;

use sprinkler_config::{DeviceConfig, validate_host};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the controller to talk to (flag > env > profile > default).
pub fn resolve_device(global: &GlobalOpts) -> Result<DeviceConfig, CliError> {
    let cfg = sprinkler_config::load_config()?;
    let mut device = cfg.resolve_device(global.profile.as_deref())?;

    apply_overrides(&mut device, global)?;
    Ok(device)
}

fn apply_overrides(device: &mut DeviceConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref host) = global.host {
        validate_host(host)?;
        device.host.clone_from(host);
    }

    if let Some(secs) = global.timeout {
        device.timeout = (secs > 0).then_some(Duration::from_secs(secs));
    }

    Ok(())
}
