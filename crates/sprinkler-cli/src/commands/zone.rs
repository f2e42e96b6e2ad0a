//! Zone command handlers.

use sprinkler_api::{ApiInvoker, ZoneCommand, ZoneId};

use crate::cli::{ZoneAction, ZoneArgs};
use crate::error::CliError;

pub async fn handle(api: &mut ApiInvoker, args: ZoneArgs) -> Result<(), CliError> {
    let (zone, command) = match args.command {
        ZoneAction::On { zone } => (zone, ZoneCommand::On),
        ZoneAction::Off { zone } => (zone, ZoneCommand::Off),
        ZoneAction::Toggle { zone } => (zone, ZoneCommand::Toggle),
    };
    let zone = ZoneId::from(zone);

    api.zone_command(&zone, command).await?;

    // The controller's reply is not checked; this only confirms delivery.
    eprintln!("zone {zone}: '{command}' sent to {}", api.target());
    Ok(())
}
