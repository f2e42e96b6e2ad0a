//! Clap derive structures for the `sprinkler` CLI.
//!
//! Defines the command tree and global flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use sprinkler_api::load_test::{DEFAULT_HOST, DEFAULT_REPEAT};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sprinkler -- remote control for the sprinkler controller
#[derive(Debug, Parser)]
#[command(
    name = "sprinkler",
    version,
    about = "Control a sprinkler controller from the command line",
    long_about = "Talks to the sprinkler controller's HTTP JSON API.\n\n\
        The controller is first addressed by host name; its IP address is\n\
        taken from /status and used for the rest of the command.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "SPRINKLER_PROFILE")]
    pub profile: Option<String>,

    /// Controller host name or address (overrides profile)
    #[arg(long, short = 'H', env = "SPRINKLER_HOST")]
    pub host: Option<String>,

    /// Request timeout in seconds, 0 for none (overrides profile)
    #[arg(long, env = "SPRINKLER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the controller status (also resolves its address)
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Print a short human-readable status summary
    Summary,

    /// Switch irrigation zones on and off
    #[command(alias = "z")]
    Zone(ZoneArgs),

    /// Stress-test how reliably the controller serves its UI files
    UiTest(UiTestArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Render man pages
    Manpage(ManpageArgs),
}

// ── Status ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Pretty-print the JSON body instead of echoing it verbatim
    #[arg(long)]
    pub json: bool,
}

// ── Zones ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ZoneArgs {
    #[command(subcommand)]
    pub command: ZoneAction,
}

#[derive(Debug, Subcommand)]
pub enum ZoneAction {
    /// Turn a zone on
    On {
        /// Zone number, comma-separated list, or "all"
        zone: String,
    },
    /// Turn a zone off
    Off {
        /// Zone number, comma-separated list, or "all"
        zone: String,
    },
    /// Turn all other zones off, then this one on
    Toggle {
        /// Zone number, comma-separated list, or "all"
        zone: String,
    },
}

// ── UI load test ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UiTestArgs {
    /// Controller to target
    #[arg(default_value = DEFAULT_HOST)]
    pub host: String,

    /// Requests to send per file (requires host)
    #[arg(default_value_t = DEFAULT_REPEAT)]
    pub repeat: u32,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Point a profile at a controller host
    SetHost {
        /// Host name or address, optionally with :port
        host: String,

        /// Profile to update (defaults to the active profile)
        #[arg(long, short = 'p')]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

// ── Man pages ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ManpageArgs {
    /// Write `sprinkler.1` and one page per subcommand into this directory
    /// instead of printing the top-level page
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}
