//! Man page rendering from the clap command tree.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use crate::cli::{Cli, ManpageArgs};
use crate::error::CliError;

pub fn handle(args: &ManpageArgs) -> Result<(), CliError> {
    let cmd = Cli::command();

    match &args.out_dir {
        None => {
            let mut stdout = io::stdout().lock();
            clap_mangen::Man::new(cmd).render(&mut stdout)?;
            stdout.flush()?;
        }
        Some(dir) => {
            fs::create_dir_all(dir)?;
            for path in write_pages(&cmd, dir)? {
                eprintln!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}

/// Write a page for `cmd` and every visible subcommand, depth first.
/// Subcommand pages are named `{parent}-{sub}.1`.
fn write_pages(cmd: &clap::Command, dir: &Path) -> io::Result<Vec<PathBuf>> {
    let name = cmd.get_name().to_owned();
    let path = dir.join(format!("{name}.1"));

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buf)?;
    fs::write(&path, buf)?;

    let mut written = vec![path];
    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        written.extend(write_pages(&sub, dir)?);
    }
    Ok(written)
}
