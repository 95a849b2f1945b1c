//! Discovery of installed host versions
//!
//! Installations are registered as subkeys of a fixed registry root, one per
//! version, each holding the executable under `<version>\Setup\VS` as
//! `EnvironmentPath`. The storage itself sits behind [`InstallationLister`]
//! so the resolution rules can run against the Windows registry, a YAML
//! mirror of it, or a test fake.

pub mod file_registry;
pub mod system;

use std::path::PathBuf;

use crate::error::{InstallerError, Result, discovery};
use crate::version::HostVersion;

pub use file_registry::FileRegistry;
pub use system::SystemRegistry;

/// Registry path of the per-version setup key, relative to the version key
pub const SETUP_KEY: &str = r"Setup\VS";

/// Value under [`SETUP_KEY`] holding the host executable path
pub const ENVIRONMENT_PATH_VALUE: &str = "EnvironmentPath";

/// Read access to the installation registry
pub trait InstallationLister {
    /// Names of all immediate children of the registry root.
    ///
    /// Fails with `DiscoveryUnavailable` when the root does not exist.
    fn version_keys(&self) -> Result<Vec<String>>;

    /// `EnvironmentPath` for a version key, if present and non-empty
    fn environment_path(&self, version_key: &str) -> Option<PathBuf>;
}

/// A version whose executable resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstallation {
    pub version: HostVersion,
    pub executable: PathBuf,
}

/// Version listing and resolution over an [`InstallationLister`]
pub struct VersionDiscovery<'a> {
    lister: &'a dyn InstallationLister,
}

impl<'a> VersionDiscovery<'a> {
    pub fn new(lister: &'a dyn InstallationLister) -> Self {
        Self { lister }
    }

    /// Installed versions, ascending, numeric duplicates removed.
    ///
    /// Keys that are not versions (experimental hives, unrelated subkeys)
    /// are skipped.
    pub fn list_installed_versions(&self) -> Result<Vec<HostVersion>> {
        let mut versions: Vec<HostVersion> = self
            .lister
            .version_keys()?
            .iter()
            .filter_map(|key| HostVersion::parse(key).ok())
            .collect();

        versions.sort();
        versions.dedup();
        Ok(versions)
    }

    /// Executable for a version; `None` when setup is incomplete
    pub fn resolve_executable(&self, version: &HostVersion) -> Option<PathBuf> {
        self.lister.environment_path(version.key())
    }

    /// Installed versions whose executable resolves, ascending
    pub fn usable_versions(&self) -> Result<Vec<ResolvedInstallation>> {
        Ok(self.usable_among(self.list_installed_versions()?))
    }

    fn usable_among(&self, versions: Vec<HostVersion>) -> Vec<ResolvedInstallation> {
        versions
            .into_iter()
            .filter_map(|version| {
                self.resolve_executable(&version)
                    .map(|executable| ResolvedInstallation {
                        version,
                        executable,
                    })
            })
            .collect()
    }

    /// Resolve the installation to target.
    ///
    /// Without a request the highest installed version is chosen. A request
    /// consisting only of digits is treated as `<digits>.0`, and is matched
    /// numerically against the installed keys.
    pub fn resolve(&self, requested: Option<&str>) -> Result<ResolvedInstallation> {
        let requested = requested.map(str::trim).filter(|r| !r.is_empty());
        let installed = self.list_installed_versions()?;

        let version = match requested {
            Some(request) => {
                let wanted = HostVersion::from_request(request);
                let listed = wanted
                    .as_ref()
                    .ok()
                    .and_then(|wanted| installed.iter().find(|version| *version == wanted))
                    .cloned();
                match listed {
                    Some(version) => version,
                    None => {
                        let shown = wanted.map_or_else(|_| request.to_string(), |v| v.to_string());
                        return Err(self.not_usable(&shown, installed));
                    }
                }
            }
            None => installed
                .last()
                .cloned()
                .ok_or(InstallerError::NoInstallationFound)?,
        };

        match self.resolve_executable(&version) {
            Some(executable) => Ok(ResolvedInstallation {
                version,
                executable,
            }),
            None => Err(self.not_usable(version.key(), installed)),
        }
    }

    fn not_usable(&self, version: &str, installed: Vec<HostVersion>) -> InstallerError {
        let detected = self
            .usable_among(installed)
            .into_iter()
            .map(|installation| installation.version.to_string())
            .collect();
        discovery::version_not_usable(version, detected)
    }
}
