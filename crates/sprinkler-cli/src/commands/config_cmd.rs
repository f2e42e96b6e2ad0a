//! Config command handlers. None of these touch the network.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = sprinkler_config::load_config()?;
            print!("{}", toml::to_string_pretty(&cfg)?);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", sprinkler_config::config_path().display());
            Ok(())
        }

        ConfigCommand::SetHost { host, profile } => {
            // A config that fails to load is never overwritten
            let mut cfg = sprinkler_config::load_config()?;
            let name = cfg.active_profile_name(profile.as_deref().or(global.profile.as_deref()));
            cfg.set_host(&name, &host)?;
            let path = sprinkler_config::save_config(&cfg)?;
            eprintln!("profile '{name}' now targets {host} ({})", path.display());
            Ok(())
        }
    }
}
