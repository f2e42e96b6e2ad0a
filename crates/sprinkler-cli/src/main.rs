mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => fail(CliError::Argument(err)),
    };

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        fail(err);
    }
}

/// Report `err` and terminate with its exit code.
fn fail(err: CliError) -> ! {
    // clap renders its own usage text, and --help/--version arrive here too
    if let CliError::Argument(clap_err) = err {
        clap_err.exit();
    }

    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stderr only: stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // The load test takes its target from its own arguments only
        Command::UiTest(args) => commands::ui_test::handle(args).await,

        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "sprinkler", &mut std::io::stdout());
            Ok(())
        }

        Command::Manpage(args) => commands::manpage::handle(&args),

        // Everything else talks to the configured controller
        cmd => {
            let device = config::resolve_device(&cli.global)?;
            tracing::debug!(command = ?cmd, host = %device.host, "dispatching command");
            commands::dispatch(cmd, &device).await
        }
    }
}
