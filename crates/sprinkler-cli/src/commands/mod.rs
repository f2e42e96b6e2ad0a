//! Command dispatch: bridges CLI args -> `ApiInvoker` calls -> output.

pub mod config_cmd;
pub mod manpage;
pub mod status;
pub mod zone;

use sprinkler_api::ApiInvoker;
use sprinkler_config::DeviceConfig;

use crate::cli::Command;
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, device: &DeviceConfig) -> Result<(), CliError> {
    let mut api = ApiInvoker::new(device.host.clone(), &device.transport())?;

    match cmd {
        Command::Status(args) => status::handle(&mut api, &args).await,
        Command::Summary => status::summary(&mut api).await,
        Command::Zone(args) => zone::handle(&mut api, args).await,
        // Local commands are handled before dispatch
        Command::UiTest(_)
        | Command::Config(_)
        | Command::Completions(_)
        | Command::Manpage(_) => unreachable!(),
    }
}
