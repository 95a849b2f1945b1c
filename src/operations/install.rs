//! Install operation
//!
//! One pass, no retries:
//!
//! 1. resolve the host version and its executable
//! 2. check the bundle exists, then load its descriptor
//! 3. open the settings scope of the executable
//! 4. with `replace_existing`, uninstall a copy that is already there
//! 5. install for the current user
//!
//! The scope is dropped on every path out of [`InstallOperation::execute`],
//! and nothing opens it before the bundle has been loaded.

use std::path::{Path, PathBuf};

use crate::bundle::ExtensionDescriptor;
use crate::discovery::{InstallationLister, VersionDiscovery};
use crate::error::{Result, bundle};
use crate::registry::{ExtensionRegistryClient, InstalledExtension};
use crate::scope::{Profile, ScopeOpener};
use crate::ui::Reporter;
use crate::version::HostVersion;

use super::target_label;

/// Configuration options for installation
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub bundle: PathBuf,
    /// Requested host version; `None` picks the highest installed one
    pub version: Option<String>,
    pub root_suffix: Option<String>,
    pub replace_existing: bool,
}

impl InstallOptions {
    pub fn new(bundle: impl Into<PathBuf>) -> Self {
        Self {
            bundle: bundle.into(),
            ..Self::default()
        }
    }
}

/// What happened to an existing copy before installing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Replacing was not requested
    Skipped,
    NotInstalled,
    Uninstalled(InstalledExtension),
    /// Reported as installed, but the lookup found nothing to remove
    Orphaned,
}

/// Result of a successful install
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub version: HostVersion,
    pub profile: Profile,
    pub extension: ExtensionDescriptor,
    pub replacement: Replacement,
}

/// High-level install operation
pub struct InstallOperation<'a> {
    lister: &'a dyn InstallationLister,
    opener: &'a dyn ScopeOpener,
    reporter: &'a dyn Reporter,
}

impl<'a> InstallOperation<'a> {
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

    pub fn execute(&self, options: &InstallOptions) -> Result<InstallReport> {
        let resolved = VersionDiscovery::new(self.lister).resolve(options.version.as_deref())?;
        self.reporter.detail(&format!(
            "Using Visual Studio {} at {}",
            resolved.version,
            resolved.executable.display()
        ));

        let extension = load_bundle(&options.bundle)?;
        self.reporter.detail(&format!(
            "Loaded '{}' version {} from {}",
            extension.identifier,
            extension.version,
            extension.source.display()
        ));
        if let Some(description) = &extension.description {
            self.reporter.detail(description);
        }

        let scope = self
            .opener
            .open(&resolved.executable, options.root_suffix.as_deref())?;
        let profile = scope.profile().clone();
        let client = ExtensionRegistryClient::new(scope.as_ref());

        let replacement = if options.replace_existing {
            self.remove_existing(&client, &extension)?
        } else {
            Replacement::Skipped
        };

        self.reporter.status(&format!(
            "Installing '{}' version {} to {}",
            extension.name,
            extension.version,
            target_label(&resolved.version, &profile)
        ));
        client.install(&extension)?;

        Ok(InstallReport {
            version: resolved.version,
            profile,
            extension,
            replacement,
        })
    }

    fn remove_existing(
        &self,
        client: &ExtensionRegistryClient<'_>,
        extension: &ExtensionDescriptor,
    ) -> Result<Replacement> {
        if !client.is_installed(extension)? {
            return Ok(Replacement::NotInstalled);
        }

        let Some(installed) = client.find_installed(&extension.identifier)? else {
            self.reporter.warning(&format!(
                "'{}' is reported as installed but could not be found; installing anyway",
                extension.identifier
            ));
            return Ok(Replacement::Orphaned);
        };

        self.reporter.status(&format!(
            "Uninstalling existing extension '{}' version {}",
            installed.name, installed.version
        ));
        client.uninstall(&installed)?;
        Ok(Replacement::Uninstalled(installed))
    }
}

fn load_bundle(path: &Path) -> Result<ExtensionDescriptor> {
    if !path.is_file() {
        return Err(bundle::not_found(path));
    }
    ExtensionDescriptor::load(path)
}
