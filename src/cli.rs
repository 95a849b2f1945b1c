//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Environment variable overriding the profile data directory
pub const DATA_DIR_ENV: &str = "ROOTVSIX_DATA_DIR";

/// Environment variable selecting a YAML installation registry mirror
pub const REGISTRY_FILE_ENV: &str = "ROOTVSIX_REGISTRY_FILE";

/// rootvsix - VSIX installer for Visual Studio
///
/// Install, replace and uninstall VSIX extensions into a chosen Visual Studio
/// version and root suffix.
#[derive(Parser, Debug)]
#[command(
    name = "rootvsix",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install VSIX extensions into a chosen Visual Studio version and root suffix",
    long_about = "rootvsix installs, replaces and uninstalls VSIX extensions for a single \
                  Visual Studio installation, in its default profile or in a named root \
                  suffix such as the experimental instance.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  rootvsix install MyExtension.vsix\n    \
                  rootvsix install MyExtension.vsix --vs-version 16 --root-suffix Exp --replace\n    \
                  rootvsix uninstall MyCompany.MyExtension\n    \
                  rootvsix versions"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding the per-installation profiles
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read installations from a YAML registry mirror instead of the system registry
    #[arg(long, global = true, env = REGISTRY_FILE_ENV, value_name = "FILE")]
    pub registry_file: Option<PathBuf>,

    /// Do not show extraction progress
    #[arg(long, global = true)]
    pub no_progress: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a VSIX extension
    Install(InstallArgs),

    /// Uninstall an extension by identifier
    Uninstall(UninstallArgs),

    /// List detected Visual Studio versions
    Versions,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target installation and profile, shared by install and uninstall
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Visual Studio version to target, e.g. 16.0 or 16 (defaults to the highest installed)
    #[arg(long = "vs-version", value_name = "VERSION")]
    pub vs_version: Option<String>,

    /// Root suffix of the profile to use, e.g. Exp (defaults to the main profile)
    #[arg(long, value_name = "SUFFIX")]
    pub root_suffix: Option<String>,
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install into the newest Visual Studio:\n    rootvsix install MyExtension.vsix\n\n\
                   Install into the experimental instance of Visual Studio 2017:\n    \
                   rootvsix install MyExtension.vsix --vs-version 15.0 --root-suffix Exp\n\n\
                   Replace an installed copy:\n    rootvsix install MyExtension.vsix --replace")]
pub struct InstallArgs {
    /// Path to the VSIX file
    #[arg(value_name = "VSIX")]
    pub vsix: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Uninstall an existing copy of the extension before installing
    #[arg(long, visible_alias = "remove-before-installing")]
    pub replace: bool,
}

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall from the newest Visual Studio:\n    rootvsix uninstall MyCompany.MyExtension\n\n\
                  Uninstall from an experimental instance:\n    \
                  rootvsix uninstall MyCompany.MyExtension --vs-version 16 --root-suffix Exp")]
pub struct UninstallArgs {
    /// Identifier of the extension (the manifest's Identity Id)
    pub identifier: String,

    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    rootvsix completions --shell bash > ~/.bash_completion.d/rootvsix\n\n\
                  Generate zsh completions:\n    rootvsix completions --shell zsh > ~/.zfunc/_rootvsix\n\n\
                  Generate PowerShell completions:\n    rootvsix completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum, ignore_case = true)]
    pub shell: Shell,
}
