//! rootvsix - VSIX installer for Visual Studio
//!
//! Installs, replaces and uninstalls VSIX extensions into one Visual Studio
//! installation, in its default profile or a named root suffix.

use clap::Parser;

mod bundle;
mod cli;
mod commands;
mod config;
mod discovery;
mod error;
mod hash;
mod operations;
mod registry;
mod scope;
mod transaction;
mod ui;
mod version;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use config::Settings;
use error::{InstallerError, Result};

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Install(args) => commands::install::run(&Settings::from_cli(cli)?, args),
        Commands::Uninstall(args) => commands::uninstall::run(&Settings::from_cli(cli)?, args),
        Commands::Versions => commands::versions::run(&Settings::from_cli(cli)?),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn report_error(e: &InstallerError) {
    eprintln!("Error: {}", e);

    if let InstallerError::VersionNotUsable { .. } = e {
        eprintln!("Detected versions:");
        for version in e.detected_versions() {
            eprintln!("{}", version);
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and --version go to stdout and succeed
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(&cli) {
        report_error(&e);
        std::process::exit(1);
    }
}
