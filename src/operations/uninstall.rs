//! Uninstall operation
//!
//! Resolves the version and opens the scope exactly like an install, then
//! looks the identifier up and runs the two-phase removal.

use crate::discovery::{InstallationLister, VersionDiscovery};
use crate::error::{InstallerError, Result};
use crate::registry::{ExtensionRegistryClient, InstalledExtension};
use crate::scope::{Profile, ScopeOpener};
use crate::ui::Reporter;
use crate::version::HostVersion;

use super::target_label;

/// Configuration options for uninstall
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    pub identifier: String,
    pub version: Option<String>,
    pub root_suffix: Option<String>,
}

/// Result of a successful uninstall
#[derive(Debug, Clone)]
pub struct UninstallReport {
    pub version: HostVersion,
    pub profile: Profile,
    pub removed: InstalledExtension,
}

/// High-level uninstall operation
pub struct UninstallOperation<'a> {
    lister: &'a dyn InstallationLister,
    opener: &'a dyn ScopeOpener,
    reporter: &'a dyn Reporter,
}

impl<'a> UninstallOperation<'a> {
    pub fn new(
        lister: &'a dyn InstallationLister,
        opener: &'a dyn ScopeOpener,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            lister,
            opener,
            reporter,
        }
    }

    pub fn execute(&self, options: &UninstallOptions) -> Result<UninstallReport> {
        let identifier = options.identifier.trim();
        let resolved = VersionDiscovery::new(self.lister).resolve(options.version.as_deref())?;
        self.reporter.detail(&format!(
            "Using Visual Studio {} at {}",
            resolved.version,
            resolved.executable.display()
        ));

        let scope = self
            .opener
            .open(&resolved.executable, options.root_suffix.as_deref())?;
        let profile = scope.profile().clone();
        let client = ExtensionRegistryClient::new(scope.as_ref());

        let installed =
            client
                .find_installed(identifier)?
                .ok_or_else(|| InstallerError::ExtensionNotInstalled {
                    identifier: identifier.to_string(),
                })?;

        self.reporter.status(&format!(
            "Uninstalling '{}' version {} from {}",
            installed.name,
            installed.version,
            target_label(&resolved.version, &profile)
        ));
        client.uninstall(&installed)?;

        Ok(UninstallReport {
            version: resolved.version,
            profile,
            removed: installed,
        })
    }
}
