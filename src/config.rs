//! Runtime configuration
//!
//! Settings are layered: command line flag, then environment variable (both
//! handled by clap), then the platform default. Nothing is persisted.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::discovery::{FileRegistry, InstallationLister, SystemRegistry};
use crate::error::{InstallerError, Result};
use crate::scope::LocalScopeOpener;

/// Where installations are discovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// YAML mirror of the installation registry
    File(PathBuf),
    /// The Windows registry
    System,
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub registry: RegistrySource,
    pub verbose: bool,
    pub show_progress: bool,
}

/// `<local data dir>/Microsoft/VisualStudio`, next to the host's own profiles
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("Microsoft").join("VisualStudio"))
        .ok_or_else(|| InstallerError::IoError {
            message: "Cannot determine the local data directory; pass --data-dir".to_string(),
        })
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        let registry = match &cli.registry_file {
            Some(path) => RegistrySource::File(path.clone()),
            None => RegistrySource::System,
        };

        Ok(Self {
            data_dir,
            registry,
            verbose: cli.verbose,
            show_progress: !cli.no_progress,
        })
    }

    /// Installation lister for the configured registry source
    pub fn lister(&self) -> Result<Box<dyn InstallationLister>> {
        Ok(match &self.registry {
            RegistrySource::File(path) => Box::new(FileRegistry::load(path)?),
            RegistrySource::System => Box::new(SystemRegistry::new()),
        })
    }

    pub fn scope_opener(&self) -> LocalScopeOpener {
        LocalScopeOpener::new(self.data_dir.clone(), self.show_progress)
    }
}
